//! Main workflow orchestration logic
//!
//! Runs one changelog generation: bound the history with the saved cursor,
//! interpret each commit, assemble the changelog, then advance the cursor.
//! Argument parsing, rendering and file output stay in `main.rs`.

use crate::boundary::BoundaryWarning;
use crate::changelog::Changelog;
use crate::config::Config;
use crate::cursor::{Cursor, CursorStore};
use crate::domain::{ClassifiedCommit, Classifier};
use crate::error::Result;
use crate::git::Repository;

/// Arguments for the changelog workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogWorkflowArgs {
    /// Maximum number of commits to read
    pub max: usize,

    /// Use `untagged` instead of the commit hash for unversioned commits
    pub group_untagged: bool,

    /// Skip loading the saved cursor; the cursor is still saved afterwards
    pub ignore_cache: bool,

    /// Carry commit hashes on changelog entries
    pub detail: bool,

    /// Preview mode - don't advance the cursor
    pub dry_run: bool,

    /// Branches expected to be released from; empty disables the check
    pub release_branches: Vec<String>,
}

impl ChangelogWorkflowArgs {
    /// Workflow arguments taken from configuration, before CLI overrides
    pub fn from_config(config: &Config) -> Self {
        ChangelogWorkflowArgs {
            max: config.history.max_commits,
            group_untagged: config.history.group_untagged,
            ignore_cache: false,
            detail: config.output.detail,
            dry_run: false,
            release_branches: config.history.release_branches.clone(),
        }
    }
}

impl Default for ChangelogWorkflowArgs {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of a successful changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The assembled changelog for the commits read in this run
    pub changelog: Changelog,

    /// Number of commits read
    pub processed: usize,

    /// Cursor after the run: the newest processed commit, or the previous cursor
    pub cursor: Option<Cursor>,

    /// Whether a saved cursor bounded the history read
    pub incremental: bool,

    /// Non-fatal conditions to report
    pub warnings: Vec<BoundaryWarning>,
}

/// Load the saved cursor and drop it if it no longer points into history
fn resolve_cursor<R: Repository, S: CursorStore>(
    repo: &R,
    store: &S,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<Option<Cursor>> {
    let cursor = match store.load() {
        Some(cursor) => cursor,
        None => return Ok(None),
    };

    if repo.contains_commit(&cursor.last_processed_hash)? {
        Ok(Some(cursor))
    } else {
        warnings.push(BoundaryWarning::CursorNotInHistory {
            hash: cursor.last_processed_hash,
        });
        Ok(None)
    }
}

/// Plan a changelog run without touching the cursor store
///
/// Orchestrates the read-only part of a generation run:
/// 1. Check the current branch against the release branches
/// 2. Load the cursor (unless ignored) and verify it is still in history
/// 3. Read up to `max` commits newer than the cursor
/// 4. Resolve versions and classify commits
/// 5. Assemble the changelog
///
/// The returned cursor points at the newest commit read; persist it with
/// [commit_cursor] once the changelog has been written.
///
/// # Arguments
///
/// * `repo` - Source of commit history
/// * `store` - Cursor persistence (only read here)
/// * `classifier` - Keyword classifier for commit messages
/// * `args` - Workflow arguments
///
/// # Returns
///
/// The assembled changelog and run metadata, or an error if history cannot be read
pub fn prepare_changelog<R: Repository, S: CursorStore>(
    repo: &R,
    store: &S,
    classifier: &Classifier,
    args: &ChangelogWorkflowArgs,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    if !args.release_branches.is_empty() {
        if let Some(branch) = repo.current_branch()? {
            if !args.release_branches.contains(&branch) {
                warnings.push(BoundaryWarning::UnexpectedBranch {
                    branch,
                    expected: args.release_branches.clone(),
                });
            }
        }
    }

    let previous = if args.ignore_cache {
        log::debug!("Ignoring saved cursor");
        None
    } else {
        resolve_cursor(repo, store, &mut warnings)?
    };
    let incremental = previous.is_some();

    let stop_at = previous.as_ref().map(|c| c.last_processed_hash.as_str());
    let records = repo.recent_commits(args.max, stop_at)?;
    log::info!(
        "Read {} commit(s){}",
        records.len(),
        stop_at
            .map(|h| format!(" newer than {}", crate::git::short_hash(h)))
            .unwrap_or_default()
    );

    let commits: Vec<ClassifiedCommit> = records
        .into_iter()
        .map(|record| ClassifiedCommit::classify(record, classifier, args.group_untagged))
        .collect();

    for commit in &commits {
        log::debug!(
            "#{} {} {} [{}]",
            commit.record.short_hash(),
            commit.version,
            commit.record.subject(),
            commit.category
        );
    }

    let changelog = Changelog::assemble(&commits, args.detail);

    let cursor = match commits.first() {
        None => {
            warnings.push(BoundaryWarning::NoNewCommits {
                cursor_hash: stop_at.map(|h| h.to_string()),
            });
            previous
        }
        Some(newest) => {
            if newest.record.tags.is_empty() {
                warnings.push(BoundaryWarning::LatestCommitUntagged {
                    hash: newest.record.hash.clone(),
                });
            }
            Some(Cursor::new(newest.record.hash.clone()))
        }
    };

    Ok(WorkflowResult {
        changelog,
        processed: commits.len(),
        cursor,
        incremental,
        warnings,
    })
}

/// Persist the cursor of a planned run.
///
/// Nothing is saved for a dry run or when no commits were read, so an empty run
/// keeps the previous cursor.
///
/// # Returns
/// * `Ok(true)` - The cursor was saved
/// * `Ok(false)` - Nothing to save
/// * `Err` - If the store cannot be written
pub fn commit_cursor<S: CursorStore>(
    store: &S,
    result: &WorkflowResult,
    args: &ChangelogWorkflowArgs,
) -> Result<bool> {
    if args.dry_run {
        log::debug!("Dry run, cursor not saved");
        return Ok(false);
    }
    if result.processed == 0 {
        return Ok(false);
    }

    match &result.cursor {
        Some(cursor) => {
            store.save(cursor)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Main changelog workflow
///
/// Plans the run with [prepare_changelog] and then advances the cursor with
/// [commit_cursor]. Callers that write output in between should use the two
/// steps directly so a failed write does not advance the cursor.
pub fn run_changelog_workflow<R: Repository, S: CursorStore>(
    repo: &R,
    store: &S,
    classifier: &Classifier,
    args: &ChangelogWorkflowArgs,
) -> Result<WorkflowResult> {
    let result = prepare_changelog(repo, store, classifier, args)?;
    commit_cursor(store, &result, args)?;
    Ok(result)
}
