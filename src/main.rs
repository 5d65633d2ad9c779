use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use git_changelog::cli::{commit_cursor, prepare_changelog, ChangelogWorkflowArgs};
use git_changelog::config::{self, Config};
use git_changelog::cursor::FileCursorStore;
use git_changelog::git::Git2Repository;
use git_changelog::output::{self, WriteMode};
use git_changelog::render::{render, RenderOptions};
use git_changelog::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-changelog",
    version,
    about = "Generate a changelog from git history, grouped by version and change category"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Output file (default: CHANGELOG.md)")]
    output: Option<PathBuf>,

    #[arg(long, help = "Maximum number of commits to read")]
    max: Option<usize>,

    #[arg(long, visible_alias = "detailed", help = "Include commit hashes in entries")]
    detail: bool,

    #[arg(
        long,
        help = "Use commit hashes as versions for commits without a tag or inline version"
    )]
    no_group: bool,

    #[arg(long, help = "Ignore the saved cursor and regenerate from the latest commits")]
    ignore_cache: bool,

    #[arg(long, help = "Print the changelog without writing files or saving the cursor")]
    dry_run: bool,

    #[arg(short, long, help = "Overwrite an existing changelog without asking")]
    force: bool,

    #[arg(short, long, help = "Print verbose output")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(max) = args.max {
        config.history.max_commits = max;
    }
    if args.no_group {
        config.history.group_untagged = false;
    }
    if args.detail {
        config.output.detail = true;
    }
    if let Some(output) = &args.output {
        config.output.path = output.display().to_string();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    apply_overrides(&mut config, &args);
    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    // Initialize git operations
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let store = FileCursorStore::new(repo.workdir().join(&config.history.cache_file));
    let classifier = config.categories.classifier();

    let workflow_args = ChangelogWorkflowArgs {
        ignore_cache: args.ignore_cache,
        dry_run: args.dry_run,
        ..ChangelogWorkflowArgs::from_config(&config)
    };

    let result = match prepare_changelog(&repo, &store, &classifier, &workflow_args) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("Failed to read commit history: {}", e));
            std::process::exit(1);
        }
    };

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    let text = render(
        &result.changelog,
        &RenderOptions {
            date_format: config.output.date_format.clone(),
        },
    );

    if args.dry_run {
        ui::display_status("Dry run, nothing written:");
        println!("\n{}", text);
        return Ok(());
    }

    if result.changelog.is_empty() {
        ui::display_success("Changelog is up to date");
        return Ok(());
    }

    ui::display_changelog_summary(&result.changelog, result.processed, result.incremental);

    let output_path = PathBuf::from(&config.output.path);
    let mode = if result.incremental {
        WriteMode::Prepend
    } else {
        WriteMode::Replace
    };

    if mode == WriteMode::Replace
        && output_path.exists()
        && !args.force
        && !ui::confirm_action(&format!(
            "Overwrite existing {} with a full changelog?",
            output_path.display()
        ))?
    {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    if let Err(e) = output::write_changelog(&output_path, &text, mode) {
        ui::display_error(&format!(
            "Failed to write {}: {}",
            output_path.display(),
            e
        ));
        std::process::exit(1);
    }

    if let Err(e) = commit_cursor(&store, &result, &workflow_args) {
        ui::display_error(&format!(
            "Changelog written but cursor {} could not be saved: {}",
            store.path().display(),
            e
        ));
        std::process::exit(1);
    }

    ui::display_success(&format!("Wrote {}", output_path.display()));
    Ok(())
}
