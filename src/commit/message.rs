//! The commit record filled in by the form and its conventional-commit rendering.

use crate::commit::kind::CommitType;
use crate::error::ValidationError;
use crate::form::input::{DESCRIPTION_LIMIT, single_line, validate_body, validate_description};

/// Commit details collected from the operator.
///
/// One instance lives for the whole session and is lent to the form by
/// exclusive reference. Once the form completes it is frozen into a
/// [`ConventionalCommit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitIntent {
    pub commit_type: Option<CommitType>,
    pub scope: String,
    pub breaking_change: bool,
    pub description: String,
    pub body: String,
}

impl CommitIntent {
    /// Create an intent whose description starts as the first line of
    /// `message`, without control characters, cut to the description limit.
    pub fn seeded(message: &str) -> Self {
        Self {
            description: single_line(message, DESCRIPTION_LIMIT),
            ..Self::default()
        }
    }

    /// Validate every field and produce the immutable commit.
    pub fn freeze(&self) -> Result<ConventionalCommit, ValidationError> {
        let commit_type = self.commit_type.ok_or(ValidationError::MissingType)?;
        validate_description(&self.description)?;
        validate_body(&self.body)?;

        Ok(ConventionalCommit {
            commit_type,
            scope: self.scope.trim().to_string(),
            breaking_change: self.breaking_change,
            description: self.description.clone(),
            body: self.body.clone(),
        })
    }

    /// Render the message, validating first.
    pub fn message(&self) -> Result<String, ValidationError> {
        self.freeze().map(|commit| commit.format())
    }
}

/// A validated conventional commit, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub commit_type: CommitType,
    pub scope: String,
    pub breaking_change: bool,
    pub description: String,
    pub body: String,
}

impl ConventionalCommit {
    /// Format the commit message for git.
    ///
    /// Produces:
    /// ```text
    /// type(scope)!: description
    ///
    /// Body text.
    /// ```
    /// The scope segment, the `!` marker and the body block each appear
    /// only when set.
    pub fn format(&self) -> String {
        let mut subject = String::from(self.commit_type.as_str());
        if !self.scope.is_empty() {
            subject.push('(');
            subject.push_str(&self.scope);
            subject.push(')');
        }
        if self.breaking_change {
            subject.push('!');
        }
        subject.push_str(": ");
        subject.push_str(&self.description);

        if self.body.is_empty() {
            subject
        } else {
            format!("{subject}\n\n{}", self.body)
        }
    }
}
