use crate::error::{ChangelogError, Result};
use crate::git::CommitRecord;
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            ChangelogError::repository(format!(
                "Not in a git repository ({}): {}",
                path.as_ref().display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Working directory of the repository (the `.git` directory for bare repositories)
    pub fn workdir(&self) -> PathBuf {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .to_path_buf()
    }

    /// OID of HEAD, or `None` when HEAD is unborn (no commits yet)
    fn head_oid(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(head.target()),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Map every tagged commit to the names of the tags pointing at it.
    ///
    /// Handles both lightweight and annotated tags. Tags that do not peel to a
    /// commit (e.g. tagged trees or blobs) are skipped.
    fn tag_map(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut map: HashMap<Oid, Vec<String>> = HashMap::new();
        let names = self.repo.tag_names(None)?;

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(r) => r,
                Err(_) => continue,
            };
            if let Ok(commit) = reference.peel_to_commit() {
                map.entry(commit.id()).or_default().push(name.to_string());
            }
        }

        Ok(map)
    }
}

impl super::Repository for Git2Repository {
    fn recent_commits(&self, max: usize, stop_at: Option<&str>) -> Result<Vec<CommitRecord>> {
        let head = match self.head_oid()? {
            Some(oid) => oid,
            None => {
                log::debug!("HEAD is unborn, history is empty");
                return Ok(Vec::new());
            }
        };

        let tags = self.tag_map()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;
        if let Some(stop) = stop_at {
            // Only the cursor and its ancestors are hidden; older side-branch
            // commits merged in later are still walked.
            match Oid::from_str(stop) {
                Ok(oid) if self.repo.find_commit(oid).is_ok() => revwalk.hide(oid)?,
                _ => log::warn!("Cursor {} is not a commit, reading full history", stop),
            }
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            if commits.len() >= max {
                break;
            }

            let oid = oid_result?;
            let hash = oid.to_string();
            let commit = self.repo.find_commit(oid)?;

            commits.push(CommitRecord {
                hash,
                message: commit.message().unwrap_or("").trim().to_string(),
                tags: tags.get(&oid).cloned().unwrap_or_default(),
                timestamp: commit.time().seconds(),
            });
        }

        Ok(commits)
    }

    fn contains_commit(&self, hash: &str) -> Result<bool> {
        let oid = match Oid::from_str(hash) {
            Ok(oid) => oid,
            Err(_) => return Ok(false),
        };

        match self.repo.find_commit(oid) {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        let head = match self.head_oid()? {
            Some(head) => head,
            None => return Ok(false),
        };

        if head == oid {
            return Ok(true);
        }

        Ok(self.repo.graph_descendant_of(head, oid)?)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(|s| s.to_string())),
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
