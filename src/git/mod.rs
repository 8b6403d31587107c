//! Git operations using git2-rs.

pub mod guard;
pub mod repository;
pub mod status;

pub use guard::{WrittenCommit, check_preconditions, commit};
pub use repository::{Backend, CommitSummary, GitRepository};
pub use status::{FileStatus, StatusCode, StatusSnapshot};
