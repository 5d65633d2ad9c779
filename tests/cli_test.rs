// tests/cli_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use git2::{Repository, Signature, Time};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_git-changelog"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    bin()
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute git-changelog")
}

// Helper function to setup a temporary git repo with a tagged history
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    let messages = ["Initial commit", "added login page", "fixed (v1.1) session bug"];
    let mut parent: Option<git2::Oid> = None;

    for (i, message) in messages.iter().enumerate() {
        let content_path = temp_dir.path().join("README.md");
        fs::write(&content_path, format!("revision {}\n", i)).expect("Could not write file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");

        // 2024-03-05T12:00:00Z plus one minute per commit
        let sig = Signature::new(
            "Test User",
            "test@example.com",
            &Time::new(1_709_640_000 + i as i64 * 60, 0),
        )
        .unwrap();

        let parent_commit = parent.map(|oid| repo.find_commit(oid).unwrap());
        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit");

        if i == 0 {
            repo.tag_lightweight("v1.0", &repo.find_object(oid, None).unwrap(), false)
                .expect("Could not create tag");
        }
        parent = Some(oid);
    }

    temp_dir
}

#[test]
fn test_help() {
    let output = bin().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-changelog"));
    assert!(stdout.contains("--ignore-cache"));
    assert!(stdout.contains("--no-group"));
}

#[test]
fn test_version() {
    let output = bin().arg("--version").output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_in(temp_dir.path(), &["--dry-run"]);
    // A temp dir nested in some outer repository would be discovered instead
    if Repository::discover(temp_dir.path()).is_err() {
        assert!(!output.status.success());
    }
}

#[test]
fn test_dry_run_prints_without_writing() {
    let repo_dir = setup_test_repo();

    let output = run_in(repo_dir.path(), &["--dry-run"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("## v1.1 (2024/3/5):"), "got: {}", stdout);
    assert!(stdout.contains("  FIXED:\n      fixed (v1.1) session bug"));
    assert!(stdout.contains("## untagged (2024/3/5):"));
    assert!(stdout.contains("## v1.0 (2024/3/5):"));

    assert!(!repo_dir.path().join("CHANGELOG.md").exists());
    assert!(!repo_dir.path().join(".changelog.cache").exists());
}

#[test]
fn test_writes_changelog_and_cursor() {
    let repo_dir = setup_test_repo();

    let output = run_in(repo_dir.path(), &["--detail"]);
    assert!(output.status.success());

    let changelog = fs::read_to_string(repo_dir.path().join("CHANGELOG.md")).unwrap();
    let v11 = changelog.find("## v1.1").unwrap();
    let untagged = changelog.find("## untagged").unwrap();
    let v10 = changelog.find("## v1.0").unwrap();
    assert!(v11 < untagged && untagged < v10);
    assert!(changelog.contains("      added login page ("));

    let cache = fs::read_to_string(repo_dir.path().join(".changelog.cache")).unwrap();
    assert!(cache.contains("last_processed_hash"));

    // Nothing new: the changelog is left alone
    let output = run_in(repo_dir.path(), &[]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(repo_dir.path().join("CHANGELOG.md")).unwrap(),
        changelog
    );
}

#[test]
fn test_no_group_uses_hashes() {
    let repo_dir = setup_test_repo();

    let output = run_in(repo_dir.path(), &["--dry-run", "--no-group"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("## untagged"));
    assert!(stdout.contains("## v1.1"));
}

#[test]
fn test_custom_output_path() {
    let repo_dir = setup_test_repo();

    let output = run_in(repo_dir.path(), &["-o", "docs/CHANGES.md", "--max", "1"]);
    assert!(output.status.success());

    let changelog = fs::read_to_string(repo_dir.path().join("docs/CHANGES.md")).unwrap();
    assert!(changelog.starts_with("## v1.1"));
    assert!(!changelog.contains("v1.0"));
}
