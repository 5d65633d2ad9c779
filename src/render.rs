//! Markdown rendering of an assembled changelog.

use std::fmt::Write;

use chrono::DateTime;

use crate::changelog::{Changelog, ChangelogEntry};
use crate::git::short_hash;

/// Options controlling how a changelog is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// chrono format string for the version date
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            date_format: "%Y/%-m/%-d".to_string(),
        }
    }
}

/// Format a Unix timestamp as a UTC date.
///
/// Falls back to `%Y-%m-%d` when `format` is not a valid chrono format string.
pub fn format_date(timestamp: i64, format: &str) -> String {
    let date = match DateTime::from_timestamp(timestamp, 0) {
        Some(date) => date,
        None => return "unknown date".to_string(),
    };

    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        log::warn!("Invalid date format '{}', using %Y-%m-%d", format);
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

fn render_entry(entry: &ChangelogEntry) -> String {
    let subject = entry.message.lines().next().unwrap_or("");
    match &entry.hash {
        Some(hash) => format!("      {} ({})\n", subject, short_hash(hash)),
        None => format!("      {}\n", subject),
    }
}

/// Render a changelog as
///
/// ```text
/// ## <version> (<date>):
///   <CATEGORY>:
///       <message>
/// ```
///
/// An empty changelog renders as an empty string.
pub fn render(changelog: &Changelog, options: &RenderOptions) -> String {
    let mut out = String::new();

    for (i, version) in changelog.versions().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "## {} ({}):\n",
            version.version,
            format_date(version.timestamp, &options.date_format)
        ));

        for section in &version.categories {
            out.push_str(&format!("  {}:\n", section.category));
            for entry in &section.entries {
                out.push_str(&render_entry(entry));
            }
        }
    }

    out
}
