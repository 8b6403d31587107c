//! Repository guard: the staged-changes precondition and the confirmed commit.

use std::fmt;

use git2::Oid;
use tracing::{debug, info, warn};

use crate::error::{CommitError, GitError};
use crate::form::Interaction;
use crate::git::repository::{Backend, CommitSummary};

/// Check that the repository has something staged to commit.
pub fn check_preconditions<B: Backend + ?Sized>(backend: &B) -> Result<(), GitError> {
    let status = backend.status()?;

    if !status.has_staged_changes() {
        if !status.is_empty() {
            debug!("Changed but unstaged:\n{}", status);
        }
        return Err(GitError::NoStagedChanges);
    }

    debug!("Staged paths: {:?}", status.staged_paths());
    Ok(())
}

/// A commit that has been written to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCommit {
    pub id: Oid,
    /// `None` when the new commit could not be read back.
    pub summary: Option<CommitSummary>,
}

impl fmt::Display for WrittenCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.summary {
            Some(summary) => write!(f, "{}", summary),
            None => writeln!(f, "commit {}", self.id),
        }
    }
}

/// Show the status, ask for confirmation, then commit `message`.
///
/// Returns `Ok(None)` when the operator declines; nothing is written in
/// that case. A failed write is returned as-is and never retried. Once the
/// write succeeds the result is `Ok` even if the commit cannot be described.
pub fn commit<B, I>(
    backend: &B,
    io: &mut I,
    message: &str,
) -> Result<Option<WrittenCommit>, CommitError>
where
    B: Backend + ?Sized,
    I: Interaction + ?Sized,
{
    println!("Repository status before commit:");
    match backend.status() {
        Ok(status) => println!("{}", status),
        Err(e) => warn!("Could not read status before commit: {}", e),
    }

    let confirmed = io.confirm("Commit?").map_err(CommitError::Confirmation)?;
    if !confirmed {
        info!("Commit declined");
        return Ok(None);
    }

    let id = backend.create_commit(message)?;
    let summary = match backend.describe_commit(id) {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Created commit {} but could not describe it: {}", id, e);
            None
        }
    };
    Ok(Some(WrittenCommit { id, summary }))
}
