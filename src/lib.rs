//! grapho - A CLI tool that composes conventional commit messages through an interactive form.
//!
//! # Overview
//!
//! grapho checks that the repository has staged changes, walks the operator
//! through a two-step terminal form (type, scope and breaking flag, then
//! description and body), renders a Conventional Commits message and, after
//! a final confirmation, commits it with git2.

pub mod commit;
pub mod error;
pub mod form;
pub mod git;
pub mod session;

// Re-export commonly used types
pub use commit::{CommitIntent, CommitType, ConventionalCommit};
pub use error::{CommitError, FormError, GitError, SessionError, ValidationError};
pub use form::{Event, Form, FormOutcome, FormState, Interaction};
pub use git::{Backend, CommitSummary, GitRepository, StatusSnapshot, WrittenCommit};
pub use session::{SessionConfig, SessionOutcome, run_session};
