use crate::error::{ChangelogError, Result};
use crate::git::{CommitRecord, Repository};

/// Mock repository for testing without actual git operations
///
/// History is held newest first, mirroring what [Repository::recent_commits] returns.
pub struct MockRepository {
    history: Vec<CommitRecord>,
    branch: Option<String>,
    unavailable: bool,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `master`
    pub fn new() -> Self {
        MockRepository {
            history: Vec::new(),
            branch: Some("master".to_string()),
            unavailable: false,
        }
    }

    /// Create a mock repository from commits listed newest first
    pub fn with_history(history: Vec<CommitRecord>) -> Self {
        MockRepository {
            history,
            ..Self::new()
        }
    }

    /// Record a new commit on top of HEAD
    pub fn commit(&mut self, record: CommitRecord) {
        self.history.insert(0, record);
    }

    /// Replace the whole history, e.g. to simulate a rebase
    pub fn rewrite_history(&mut self, history: Vec<CommitRecord>) {
        self.history = history;
    }

    /// Set the current branch (`None` for a detached HEAD)
    pub fn set_branch(&mut self, branch: Option<&str>) {
        self.branch = branch.map(|b| b.to_string());
    }

    /// Make every history query fail, as if the repository were unreadable
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(ChangelogError::repository("mock repository is unavailable"));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn recent_commits(&self, max: usize, stop_at: Option<&str>) -> Result<Vec<CommitRecord>> {
        self.check_available()?;

        Ok(self
            .history
            .iter()
            .take_while(|c| stop_at != Some(c.hash.as_str()))
            .take(max)
            .cloned()
            .collect())
    }

    fn contains_commit(&self, hash: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self.history.iter().any(|c| c.hash == hash))
    }

    fn current_branch(&self) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.branch.clone())
    }
}
