//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::changelog::Changelog;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line description of what a run produced, e.g. `3 versions, 7 entries from 7 commits`
pub fn summarize(changelog: &Changelog, processed: usize) -> String {
    let versions = changelog.len();
    let entries = changelog.entry_count();
    format!(
        "{} version{}, {} entr{} from {} commit{}",
        versions,
        if versions == 1 { "" } else { "s" },
        entries,
        if entries == 1 { "y" } else { "ies" },
        processed,
        if processed == 1 { "" } else { "s" },
    )
}

/// Display the version sections of a changelog with their entry counts.
pub fn display_changelog_summary(changelog: &Changelog, processed: usize, incremental: bool) {
    let mode = if incremental { "Incremental" } else { "Full" };
    println!(
        "\n{}",
        style(format!("{} changelog: {}", mode, summarize(changelog, processed))).bold()
    );

    for version in changelog.versions().iter().take(10) {
        let count: usize = version.categories.iter().map(|c| c.entries.len()).sum();
        println!("  - {} ({})", style(&version.version).cyan(), count);
    }

    if changelog.len() > 10 {
        println!("  ... and {} more versions", changelog.len() - 10);
    }
}
