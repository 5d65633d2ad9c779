use std::fs;
use std::path::Path;

use crate::error::Result;

/// How rendered text is combined with an existing changelog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the file with the rendered text
    Replace,
    /// Put the rendered text above the existing content
    Prepend,
}

/// Write a rendered changelog to `path`.
///
/// Empty text leaves the file untouched.
///
/// # Returns
/// * `Ok(true)` - The file was written
/// * `Ok(false)` - Nothing to write
/// * `Err` - If the file cannot be read or written
pub fn write_changelog(path: &Path, text: &str, mode: WriteMode) -> Result<bool> {
    if text.is_empty() {
        return Ok(false);
    }

    let content = match mode {
        WriteMode::Replace => text.to_string(),
        WriteMode::Prepend => {
            let existing = match fs::read_to_string(path) {
                Ok(existing) => existing,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
                Err(e) => return Err(e.into()),
            };

            if existing.trim().is_empty() {
                text.to_string()
            } else {
                format!("{}\n{}", text, existing)
            }
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;
    Ok(true)
}
