//! Conventional commit types and message formatting.

pub mod kind;
pub mod message;

pub use kind::CommitType;
pub use message::{CommitIntent, ConventionalCommit};
