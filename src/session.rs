//! Commit session: precondition check, form, then commit or dry-run preview.

use tracing::{debug, warn};

use crate::commit::CommitIntent;
use crate::error::{GitError, SessionError};
use crate::form::{self, Form, FormOutcome, Interaction};
use crate::git::{Backend, WrittenCommit, check_preconditions};

/// Configuration for a commit session, derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Print the message instead of committing; staged changes are not required.
    pub dry_run: bool,
    /// Initial description, cut to the description limit.
    pub message: Option<String>,
}

/// How a session ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Committed(WrittenCommit),
    DryRun(String),
    /// The operator cancelled the form.
    Cancelled,
    /// The operator answered no at the final confirmation.
    Declined,
}

/// Run one commit session against `backend`, talking to the operator via `io`.
pub fn run_session<B, I>(
    config: &SessionConfig,
    backend: &B,
    io: &mut I,
) -> Result<SessionOutcome, SessionError>
where
    B: Backend + ?Sized,
    I: Interaction + ?Sized,
{
    // ── Precondition ──
    match check_preconditions(backend) {
        Ok(()) => {}
        Err(e) if config.dry_run => match e {
            GitError::NoStagedChanges => debug!("Dry run: ignoring missing staged changes"),
            other => warn!("Dry run: {}", other),
        },
        Err(e) => return Err(e.into()),
    }

    // ── Form ──
    let mut intent = match config.message.as_deref() {
        Some(message) if !message.is_empty() => CommitIntent::seeded(message),
        _ => CommitIntent::default(),
    };

    let outcome = {
        let mut form = Form::new(&mut intent);
        form::run(&mut form, io)?
    };

    let commit = match outcome {
        FormOutcome::Completed(commit) => commit,
        FormOutcome::Cancelled => {
            debug!("Form cancelled; nothing to commit");
            return Ok(SessionOutcome::Cancelled);
        }
    };
    let message = commit.format();

    // ── Dry run or commit ──
    if config.dry_run {
        println!("Commit message:");
        println!("{}", message);
        return Ok(SessionOutcome::DryRun(message));
    }

    match crate::git::commit(backend, io, &message)? {
        Some(written) => {
            println!("Committed:");
            println!("{}", written);
            Ok(SessionOutcome::Committed(written))
        }
        None => Ok(SessionOutcome::Declined),
    }
}
