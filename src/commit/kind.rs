//! Conventional commit types.

use std::fmt;

/// Conventional commit types, in the order they are offered to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Build,
    Chore,
    Ci,
    Docs,
    Perf,
    Refactor,
    Revert,
    Style,
    Test,
}

impl CommitType {
    /// Every commit type, in presentation order.
    pub const ALL: [CommitType; 11] = [
        Self::Feat,
        Self::Fix,
        Self::Build,
        Self::Chore,
        Self::Ci,
        Self::Docs,
        Self::Perf,
        Self::Refactor,
        Self::Revert,
        Self::Style,
        Self::Test,
    ];

    /// The type as written in a commit subject.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Build => "build",
            Self::Chore => "chore",
            Self::Ci => "ci",
            Self::Docs => "docs",
            Self::Perf => "perf",
            Self::Refactor => "refactor",
            Self::Revert => "revert",
            Self::Style => "style",
            Self::Test => "test",
        }
    }

    /// One-line explanation shown next to the type in the selector.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Feat => "a new feature",
            Self::Fix => "a bug fix",
            Self::Build => "changes that affect the build system or external dependencies",
            Self::Chore => "changes to the build process or auxiliary tools and libraries",
            Self::Ci => "changes to our CI configuration files and scripts",
            Self::Docs => "documentation only changes",
            Self::Perf => "a code change that improves performance",
            Self::Refactor => "a code change that neither fixes a bug nor adds a feature",
            Self::Revert => "reverts a previous commit",
            Self::Style => "changes that do not affect the meaning of the code",
            Self::Test => "adding missing tests or correcting existing tests",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("Unknown commit type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("FEAT".parse::<CommitType>(), Ok(CommitType::Feat));
        assert_eq!("Revert".parse::<CommitType>(), Ok(CommitType::Revert));
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "feature".parse::<CommitType>().unwrap_err();
        assert!(err.contains("feature"));
    }

    #[test]
    fn test_all_round_trips_through_display() {
        for ty in CommitType::ALL {
            assert_eq!(ty.to_string().parse::<CommitType>(), Ok(ty));
        }
    }
}
