//! Repository access using git2-rs.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, FixedOffset, TimeZone};
use git2::{ErrorCode, Oid, Repository, StatusOptions};
use tracing::debug;

use crate::error::{CommitError, GitError};
use crate::git::status::{FileStatus, StatusSnapshot};

/// Trait for the version-control operations a commit session needs.
///
/// This abstraction allows mocking the repository in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend {
    /// Read the status of every changed path.
    fn status(&self) -> Result<StatusSnapshot, GitError>;

    /// Record the staged tree as a new commit on HEAD.
    fn create_commit(&self, message: &str) -> Result<Oid, CommitError>;

    /// Look up a commit for display.
    fn describe_commit(&self, id: Oid) -> Result<CommitSummary, CommitError>;
}

/// A created commit, ready to show to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub id: Oid,
    pub author_name: String,
    pub author_email: String,
    pub time: DateTime<FixedOffset>,
    pub message: String,
}

impl CommitSummary {
    /// First line of the message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commit {}", self.id)?;
        writeln!(f, "Author: {} <{}>", self.author_name, self.author_email)?;
        writeln!(f, "Date:   {}", self.time.format("%a %b %-d %H:%M:%S %Y %z"))?;
        writeln!(f)?;
        for line in self.message.lines() {
            if line.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, "    {}", line)?;
            }
        }
        Ok(())
    }
}

/// A git repository on disk.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository containing `path`, searching parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        debug!("Opened repository at {}", repo.path().display());
        Ok(Self { repo })
    }

    /// Wrap an already opened repository.
    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    pub fn inner(&self) -> &Repository {
        &self.repo
    }
}

impl Backend for GitRepository {
    fn status(&self) -> Result<StatusSnapshot, GitError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .renames_head_to_index(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(GitError::StatusFailed)?;

        let snapshot: StatusSnapshot = statuses
            .iter()
            .filter_map(|entry| {
                let path = entry.path().map(String::from).or_else(|| {
                    entry.head_to_index().and_then(|delta| {
                        delta
                            .new_file()
                            .path()
                            .map(|p| p.to_string_lossy().to_string())
                    })
                })?;
                Some((path, FileStatus::from_git2(entry.status())))
            })
            .collect();

        debug!(
            "Status: {} changed paths, {} staged",
            snapshot.len(),
            snapshot.staged_paths().len()
        );
        Ok(snapshot)
    }

    fn create_commit(&self, message: &str) -> Result<Oid, CommitError> {
        let mut index = self.repo.index().map_err(CommitError::CommitFailed)?;
        index.read(false).map_err(CommitError::CommitFailed)?;
        let tree_id = index.write_tree().map_err(CommitError::CommitFailed)?;
        let tree = self.repo.find_tree(tree_id).map_err(CommitError::CommitFailed)?;

        // Unborn branch: first commit, no parent.
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(CommitError::CommitFailed)?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(CommitError::CommitFailed(e)),
        };

        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => index.is_empty(),
        };
        if unchanged {
            return Err(CommitError::NothingStaged);
        }

        let sig = self.repo.signature().map_err(CommitError::ConfigError)?;
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(CommitError::CommitFailed)?;

        debug!("Created commit {}", oid);
        Ok(oid)
    }

    fn describe_commit(&self, id: Oid) -> Result<CommitSummary, CommitError> {
        let commit = self
            .repo
            .find_commit(id)
            .map_err(|source| CommitError::FindCommit {
                hash: id.to_string(),
                source,
            })?;

        let author = commit.author();
        let when = author.when();
        let invalid = || CommitError::InvalidTimestamp {
            hash: id.to_string(),
            seconds: when.seconds(),
            offset_minutes: when.offset_minutes(),
        };
        let offset = FixedOffset::east_opt(when.offset_minutes() * 60).ok_or_else(invalid)?;
        let time = offset
            .timestamp_opt(when.seconds(), 0)
            .single()
            .ok_or_else(invalid)?;

        Ok(CommitSummary {
            id,
            author_name: author.name().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            time,
            message: commit.message().unwrap_or("").to_string(),
        })
    }
}
