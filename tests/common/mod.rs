//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;

use git2::{Oid, Repository, Signature};

use grapho::error::FormError;
use grapho::form::{Event, Interaction};
use grapho::git::GitRepository;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory, with an identity configured.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");

        Self { dir, repo }
    }

    /// Open the repository through the crate's backend.
    pub fn backend(&self) -> GitRepository {
        GitRepository::open(self.dir.path()).expect("Failed to open test repo")
    }

    /// Write a file in the working tree without staging it.
    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write test file");
    }

    /// Add a working tree file to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write, stage and commit a file. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.write(name, content);
        self.stage(name);

        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Number of commits reachable from HEAD (0 for an unborn branch).
    pub fn commit_count(&self) -> usize {
        let Ok(head) = self.repo.head() else {
            return 0;
        };
        let mut revwalk = self.repo.revwalk().expect("Failed to create revwalk");
        revwalk
            .push(head.target().expect("HEAD has no target"))
            .expect("Failed to push HEAD");
        revwalk.count()
    }

    /// Message of the commit at HEAD.
    pub fn head_message(&self) -> String {
        let commit = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD commit");
        commit.message().unwrap_or("").to_string()
    }
}

/// An operator that replays a fixed list of events and answers the final
/// confirmation with a fixed value.
pub struct ScriptedOperator {
    pub events: VecDeque<Event>,
    pub answer: bool,
    pub confirmations: usize,
    pub last_view: String,
}

impl ScriptedOperator {
    pub fn new(events: impl IntoIterator<Item = Event>, answer: bool) -> Self {
        Self {
            events: events.into_iter().collect(),
            answer,
            confirmations: 0,
            last_view: String::new(),
        }
    }

    /// Events that fill in every field of the form and submit it.
    pub fn filling(
        type_index: usize,
        scope: &str,
        breaking: bool,
        description: &str,
        body: &str,
        answer: bool,
    ) -> Self {
        let mut events = vec![Event::Down; type_index];
        events.push(Event::Enter);
        events.extend(scope.chars().map(Event::Char));
        events.push(Event::Enter);
        if breaking {
            events.push(Event::Char('y'));
        }
        events.push(Event::Enter);
        events.extend(description.chars().map(Event::Char));
        events.push(Event::Enter);
        for ch in body.chars() {
            events.push(if ch == '\n' { Event::Enter } else { Event::Char(ch) });
        }
        events.push(Event::Tab);
        Self::new(events, answer)
    }
}

impl Interaction for ScriptedOperator {
    fn next_event(&mut self) -> Result<Event, FormError> {
        self.events.pop_front().ok_or_else(|| {
            FormError::Terminal(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "scripted events exhausted",
            ))
        })
    }

    fn render(&mut self, view: &str) -> Result<(), FormError> {
        self.last_view = console::strip_ansi_codes(view).to_string();
        Ok(())
    }

    fn confirm(&mut self, _prompt: &str) -> Result<bool, FormError> {
        self.confirmations += 1;
        Ok(self.answer)
    }
}
