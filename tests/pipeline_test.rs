// tests/pipeline_test.rs
use git_changelog::boundary::BoundaryWarning;
use git_changelog::cli::{
    commit_cursor, prepare_changelog, run_changelog_workflow, ChangelogWorkflowArgs,
};
use git_changelog::cursor::{Cursor, CursorStore, MemoryCursorStore};
use git_changelog::domain::{Category, Classifier};
use git_changelog::git::{CommitRecord, MockRepository};

fn scenario_history() -> Vec<CommitRecord> {
    vec![
        CommitRecord::new("a1", "added feature X").with_tag("v2.0"),
        CommitRecord::new("a2", "fixed (v1.9) bug Y"),
        CommitRecord::new("a3", "misc tweak"),
    ]
}

fn args() -> ChangelogWorkflowArgs {
    ChangelogWorkflowArgs {
        release_branches: Vec::new(),
        ..ChangelogWorkflowArgs::default()
    }
}

#[test]
fn test_grouped_scenario() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::new();

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args()).unwrap();
    let changelog = &result.changelog;

    assert_eq!(changelog.labels(), vec!["v2.0", "v1.9", "untagged"]);
    assert_eq!(
        changelog.version("v2.0").unwrap().messages(Category::Added),
        vec!["added feature X"]
    );
    assert_eq!(
        changelog.version("v1.9").unwrap().messages(Category::Fixed),
        vec!["fixed (v1.9) bug Y"]
    );
    assert_eq!(
        changelog
            .version("untagged")
            .unwrap()
            .messages(Category::Uncategorized),
        vec!["misc tweak"]
    );
    assert_eq!(result.processed, 3);
    assert!(!result.incremental);
}

#[test]
fn test_ungrouped_scenario_uses_hash() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::new();
    let args = ChangelogWorkflowArgs {
        group_untagged: false,
        ..args()
    };

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args).unwrap();
    assert_eq!(result.changelog.labels(), vec!["v2.0", "v1.9", "a3"]);
}

#[test]
fn test_cursor_bounds_history() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::with_cursor(Cursor::new("a2"));

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args()).unwrap();

    assert_eq!(result.processed, 1);
    assert!(result.incremental);
    assert_eq!(result.changelog.labels(), vec!["v2.0"]);
    assert_eq!(store.current().unwrap().last_processed_hash, "a1");
}

#[test]
fn test_second_run_is_empty() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::new();
    let classifier = Classifier::default();

    let first = run_changelog_workflow(&repo, &store, &classifier, &args()).unwrap();
    assert_eq!(first.processed, 3);

    let second = run_changelog_workflow(&repo, &store, &classifier, &args()).unwrap();
    assert!(second.changelog.is_empty());
    assert_eq!(second.processed, 0);
    assert!(second.warnings.contains(&BoundaryWarning::NoNewCommits {
        cursor_hash: Some("a1".to_string())
    }));
    assert_eq!(store.current().unwrap().last_processed_hash, "a1");
}

#[test]
fn test_new_commits_after_cursor() {
    let mut repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::new();
    let classifier = Classifier::default();

    run_changelog_workflow(&repo, &store, &classifier, &args()).unwrap();

    repo.commit(CommitRecord::new("b2", "improved caching"));
    repo.commit(CommitRecord::new("b1", "removed legacy flag").with_tag("v2.1"));

    let result = run_changelog_workflow(&repo, &store, &classifier, &args()).unwrap();
    assert_eq!(result.processed, 2);
    assert_eq!(result.changelog.labels(), vec!["v2.1", "untagged"]);
    assert_eq!(
        result.changelog.version("untagged").unwrap().messages(Category::Improved),
        vec!["improved caching"]
    );
    assert_eq!(store.current().unwrap().last_processed_hash, "b1");
}

#[test]
fn test_ignore_cache_skips_load_but_saves() {
    let mut repo = MockRepository::with_history(scenario_history());
    repo.commit(CommitRecord::new("a0", "changed defaults"));
    let store = MemoryCursorStore::with_cursor(Cursor::new("a1"));
    let args = ChangelogWorkflowArgs {
        ignore_cache: true,
        ..args()
    };

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args).unwrap();

    assert_eq!(result.processed, 4);
    assert!(!result.incremental);
    assert_eq!(store.current().unwrap().last_processed_hash, "a0");
}

#[test]
fn test_rewritten_history_falls_back_to_full_read() {
    let mut repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::with_cursor(Cursor::new("gone"));
    repo.rewrite_history(vec![
        CommitRecord::new("c1", "fixed rebase fallout"),
        CommitRecord::new("c2", "added thing"),
    ]);

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args()).unwrap();

    assert_eq!(result.processed, 2);
    assert!(!result.incremental);
    assert!(result.warnings.contains(&BoundaryWarning::CursorNotInHistory {
        hash: "gone".to_string()
    }));
}

#[test]
fn test_max_caps_commits() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::new();
    let args = ChangelogWorkflowArgs { max: 2, ..args() };

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args).unwrap();
    assert_eq!(result.processed, 2);
    assert_eq!(result.changelog.labels(), vec!["v2.0", "v1.9"]);
}

#[test]
fn test_dry_run_keeps_cursor() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::with_cursor(Cursor::new("a3"));
    let args = ChangelogWorkflowArgs {
        dry_run: true,
        ..args()
    };

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args).unwrap();
    assert_eq!(result.processed, 2);
    assert_eq!(store.current().unwrap().last_processed_hash, "a3");
}

#[test]
fn test_prepare_does_not_save() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::new();

    let result = prepare_changelog(&repo, &store, &Classifier::default(), &args()).unwrap();
    assert_eq!(store.load(), None);
    assert_eq!(result.cursor.as_ref().unwrap().last_processed_hash, "a1");

    assert!(commit_cursor(&store, &result, &args()).unwrap());
    assert_eq!(store.load().unwrap().last_processed_hash, "a1");
}

#[test]
fn test_empty_history() {
    let repo = MockRepository::new();
    let store = MemoryCursorStore::new();

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args()).unwrap();
    assert!(result.changelog.is_empty());
    assert_eq!(result.cursor, None);
    assert_eq!(
        result.warnings,
        vec![BoundaryWarning::NoNewCommits { cursor_hash: None }]
    );
}

#[test]
fn test_unavailable_repository_is_fatal() {
    let mut repo = MockRepository::with_history(scenario_history());
    repo.set_unavailable(true);
    let store = MemoryCursorStore::new();

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args());
    assert!(result.is_err());
    assert_eq!(store.load(), None);
}

#[test]
fn test_warnings_for_untagged_head_and_branch() {
    let mut repo = MockRepository::with_history(vec![CommitRecord::new("d1", "misc")]);
    repo.set_branch(Some("feature/x"));
    let store = MemoryCursorStore::new();
    let args = ChangelogWorkflowArgs {
        release_branches: vec!["master".to_string(), "main".to_string()],
        ..args()
    };

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args).unwrap();
    assert_eq!(
        result.warnings,
        vec![
            BoundaryWarning::UnexpectedBranch {
                branch: "feature/x".to_string(),
                expected: vec!["master".to_string(), "main".to_string()],
            },
            BoundaryWarning::LatestCommitUntagged {
                hash: "d1".to_string()
            },
        ]
    );
}

#[test]
fn test_same_label_from_tag_and_inline_marker_merges() {
    let repo = MockRepository::with_history(vec![
        CommitRecord::new("e1", "added api").with_tag("v1.0"),
        CommitRecord::new("e2", "misc (v0.9)"),
        CommitRecord::new("e3", "fixed docs (v1.0)"),
    ]);
    let store = MemoryCursorStore::new();

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args()).unwrap();
    assert_eq!(result.changelog.labels(), vec!["v1.0", "v0.9"]);
    assert_eq!(
        result.changelog.version("v1.0").unwrap().category_order(),
        vec![Category::Added, Category::Fixed]
    );
}

#[test]
fn test_detail_mode_carries_hashes() {
    let repo = MockRepository::with_history(scenario_history());
    let store = MemoryCursorStore::new();
    let args = ChangelogWorkflowArgs {
        detail: true,
        ..args()
    };

    let result = run_changelog_workflow(&repo, &store, &Classifier::default(), &args).unwrap();
    let entry = &result.changelog.versions()[0].categories[0].entries[0];
    assert_eq!(entry.hash.as_deref(), Some("a1"));
}
