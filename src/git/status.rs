//! Working tree status snapshots.

use std::collections::BTreeMap;
use std::fmt;

use git2::Status;

/// State of a file on one side of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Unmodified,
    Untracked,
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Conflicted,
}

impl StatusCode {
    /// Short-format status letter.
    pub fn as_char(self) -> char {
        match self {
            StatusCode::Unmodified => ' ',
            StatusCode::Untracked => '?',
            StatusCode::Modified => 'M',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::Copied => 'C',
            StatusCode::TypeChanged => 'T',
            StatusCode::Conflicted => 'U',
        }
    }
}

/// Status of one path, in the index (`staging`) and in the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatus {
    pub staging: StatusCode,
    pub worktree: StatusCode,
}

impl FileStatus {
    pub fn new(staging: StatusCode, worktree: StatusCode) -> Self {
        Self { staging, worktree }
    }

    /// Whether the index holds a change for this path that the next commit
    /// would record.
    pub fn is_staged(&self) -> bool {
        matches!(
            self.staging,
            StatusCode::Added
                | StatusCode::Modified
                | StatusCode::Deleted
                | StatusCode::Renamed
                | StatusCode::Copied
                | StatusCode::TypeChanged
        )
    }

    /// Convert git2 status flags.
    pub fn from_git2(status: Status) -> Self {
        if status.is_conflicted() {
            return Self::new(StatusCode::Conflicted, StatusCode::Conflicted);
        }

        let staging = if status.is_index_new() {
            StatusCode::Added
        } else if status.is_index_modified() {
            StatusCode::Modified
        } else if status.is_index_deleted() {
            StatusCode::Deleted
        } else if status.is_index_renamed() {
            StatusCode::Renamed
        } else if status.is_index_typechange() {
            StatusCode::TypeChanged
        } else {
            StatusCode::Unmodified
        };

        let worktree = if status.is_wt_new() {
            StatusCode::Untracked
        } else if status.is_wt_modified() {
            StatusCode::Modified
        } else if status.is_wt_deleted() {
            StatusCode::Deleted
        } else if status.is_wt_renamed() {
            StatusCode::Renamed
        } else if status.is_wt_typechange() {
            StatusCode::TypeChanged
        } else {
            StatusCode::Unmodified
        };

        // Untracked files show as `??`, never half-staged.
        if worktree == StatusCode::Untracked && staging == StatusCode::Unmodified {
            return Self::new(StatusCode::Untracked, StatusCode::Untracked);
        }

        Self::new(staging, worktree)
    }
}

/// Status of every changed path in the repository, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    files: BTreeMap<String, FileStatus>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, status: FileStatus) {
        self.files.insert(path.into(), status);
    }

    pub fn get(&self, path: &str) -> Option<&FileStatus> {
        self.files.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileStatus)> {
        self.files.iter().map(|(path, status)| (path.as_str(), status))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether at least one path has a staged change.
    pub fn has_staged_changes(&self) -> bool {
        self.files.values().any(FileStatus::is_staged)
    }

    /// Paths with staged changes, in path order.
    pub fn staged_paths(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, status)| status.is_staged())
            .map(|(path, _)| path)
            .collect()
    }
}

impl FromIterator<(String, FileStatus)> for StatusSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, FileStatus)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, status) in self.iter() {
            writeln!(
                f,
                "{}{} {}",
                status.staging.as_char(),
                status.worktree.as_char(),
                path
            )?;
        }
        Ok(())
    }
}
