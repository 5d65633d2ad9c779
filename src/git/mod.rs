//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over reading commit history,
//! allowing for multiple implementations including real Git repositories
//! and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait, which defines the read-only
//! history operations the changelog pipeline needs. The concrete implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! Pipeline code depends on the [Repository] trait rather than concrete
//! implementations so that history can be faked in tests.
//!
//! ```rust
//! # use git_changelog::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_changelog::Result<()> {
//! let commits = repo.recent_commits(50, None)?;
//! for commit in &commits {
//!     println!("{} {}", commit.short_hash(), commit.subject());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Length of the abbreviated hash shown in logs and detailed changelog entries
pub const SHORT_HASH_LEN: usize = 8;

/// A single commit as read from history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// The full commit hash
    pub hash: String,
    /// The commit message, whitespace-trimmed
    pub message: String,
    /// Tags pointing at this commit, in the order the repository reports them
    pub tags: Vec<String>,
    /// Committer time in seconds since the Unix epoch
    pub timestamp: i64,
}

impl CommitRecord {
    /// Create a record with no tags and a zero timestamp
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitRecord {
            hash: hash.into(),
            message: message.into().trim().to_string(),
            tags: Vec::new(),
            timestamp: 0,
        }
    }

    /// Attach a tag to this record
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the commit timestamp
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Abbreviated hash (first 8 characters)
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }
}

/// Shorten a hash to [SHORT_HASH_LEN] characters, leaving shorter strings untouched
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

/// Read-only history operations used by the changelog pipeline
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map underlying
/// errors (like `git2::Error`) to [crate::error::ChangelogError] variants. An
/// unavailable repository is fatal to the run; an empty history is not.
pub trait Repository {
    /// Get recent commits reachable from HEAD, newest first
    ///
    /// # Arguments
    /// * `max` - Maximum number of commits to return
    /// * `stop_at` - Hash of a previously processed commit; it and all of its
    ///   ancestors are excluded, so commits merged in from older side branches
    ///   are still returned. An unknown hash excludes nothing.
    ///
    /// # Returns
    /// * `Ok(Vec<CommitRecord>)` - Commits newest first (empty for an unborn HEAD)
    /// * `Err` - If history cannot be read
    fn recent_commits(&self, max: usize, stop_at: Option<&str>) -> Result<Vec<CommitRecord>>;

    /// Check whether a commit is part of the history reachable from HEAD
    ///
    /// # Returns
    /// * `Ok(true)` - The commit exists and is HEAD or one of its ancestors
    /// * `Ok(false)` - Unknown hash, or the commit is no longer reachable
    /// * `Err` - If the repository cannot be queried
    fn contains_commit(&self, hash: &str) -> Result<bool>;

    /// Name of the currently checked-out branch
    ///
    /// # Returns
    /// * `Ok(Some(name))` - HEAD points at a local branch
    /// * `Ok(None)` - Detached or unborn HEAD
    fn current_branch(&self) -> Result<Option<String>>;
}
