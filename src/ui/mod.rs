//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_changelog_summary, display_error, display_status,
    display_success, summarize,
};

/// Interprets a yes/no answer. Only "y" or "yes" (case-insensitive) confirm.
pub fn is_confirmation(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompts user to confirm an action with a yes/no prompt read from `input`.
///
/// Default is "no" if user presses Enter.
pub fn confirm_action_from<R: BufRead>(prompt: &str, input: &mut R) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(is_confirmation(&line))
}

/// Prompts user on stdin to confirm an action.
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    confirm_action_from(prompt, &mut io::stdin().lock())
}
