use std::fmt;

use crate::git::short_hash;

/// Warnings that occur at the edges of the processed history.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Nothing new since the last run (or the history is empty)
    NoNewCommits { cursor_hash: Option<String> },
    /// The saved cursor is no longer reachable from HEAD, e.g. after a rebase
    CursorNotInHistory { hash: String },
    /// The newest commit carries no tag, so its changes are not tied to a release
    LatestCommitUntagged { hash: String },
    /// Generating from a branch that is not a configured release branch
    UnexpectedBranch {
        branch: String,
        expected: Vec<String>,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { cursor_hash } => match cursor_hash {
                Some(hash) => write!(
                    f,
                    "No new commits since last run (cursor: {})",
                    short_hash(hash)
                ),
                None => write!(f, "No commits found in history"),
            },
            BoundaryWarning::CursorNotInHistory { hash } => write!(
                f,
                "Saved cursor {} is not in the current history; regenerating from the latest commits",
                short_hash(hash)
            ),
            BoundaryWarning::LatestCommitUntagged { hash } => {
                write!(f, "Latest commit {} is not tagged", short_hash(hash))
            }
            BoundaryWarning::UnexpectedBranch { branch, expected } => write!(
                f,
                "Current branch is '{}', not one of: {}",
                branch,
                expected.join(", ")
            ),
        }
    }
}
