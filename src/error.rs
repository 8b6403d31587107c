//! Error types for grapho modules using thiserror.

use thiserror::Error;

/// Errors from reading the repository.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to read repository status: {0}")]
    StatusFailed(#[source] git2::Error),

    #[error("Repository contains unstaged changes only. Stage files with `git add` first.")]
    NoStagedChanges,
}

/// Field-level validation failures raised while filling in the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("commit type must be selected")]
    MissingType,

    #[error("description cannot be empty")]
    EmptyDescription,

    #[error("{field} must be a single line of printable text")]
    ControlCharacter { field: &'static str },

    #[error("{field} cannot exceed {limit} characters")]
    LimitExceeded { field: &'static str, limit: usize },
}

/// Errors from creating or describing a commit.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Nothing staged to commit (index matches HEAD)")]
    NothingStaged,

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Failed to look up commit {hash}: {source}")]
    FindCommit {
        hash: String,
        #[source]
        source: git2::Error,
    },

    #[error("Commit {hash} has invalid timestamp (seconds={seconds}, offset={offset_minutes}m)")]
    InvalidTimestamp {
        hash: String,
        seconds: i64,
        offset_minutes: i32,
    },

    #[error("Failed to confirm commit: {0}")]
    Confirmation(#[source] FormError),
}

/// Errors from the interactive terminal.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("An interactive terminal is required to fill in the commit form")]
    NotATerminal,

    #[error("Terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::Terminal(err)
    }
}

/// Errors that end a commit session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Form(#[from] FormError),
}
