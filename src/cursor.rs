//! Persisted marker of the last processed commit.
//!
//! The cursor bounds how much history an incremental run reads. Loading never
//! fails: a missing or unreadable cursor just means "start from the top of history".

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChangelogError, Result};

/// Hash of the newest commit handled by a previous run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub last_processed_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Cursor {
    pub fn new(last_processed_hash: impl Into<String>) -> Self {
        Cursor {
            last_processed_hash: last_processed_hash.into(),
            saved_at: Some(Utc::now()),
        }
    }
}

/// Storage for the cursor between runs
pub trait CursorStore {
    /// Load the saved cursor, or `None` if there is none or it cannot be read
    fn load(&self) -> Option<Cursor>;

    /// Persist a cursor, replacing any previous one
    fn save(&self, cursor: &Cursor) -> Result<()>;
}

/// Cursor stored as a small TOML file
#[derive(Debug, Clone)]
pub struct FileCursorStore {
    path: PathBuf,
}

impl FileCursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCursorStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CursorStore for FileCursorStore {
    fn load(&self) -> Option<Cursor> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No cursor at {}", self.path.display());
                return None;
            }
            Err(e) => {
                log::warn!("Ignoring unreadable cursor {}: {}", self.path.display(), e);
                return None;
            }
        };

        match toml::from_str::<Cursor>(&content) {
            Ok(cursor) if !cursor.last_processed_hash.trim().is_empty() => Some(cursor),
            Ok(_) => {
                log::warn!("Ignoring empty cursor in {}", self.path.display());
                None
            }
            Err(e) => {
                log::warn!("Ignoring corrupt cursor {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, cursor: &Cursor) -> Result<()> {
        let content = toml::to_string_pretty(cursor)
            .map_err(|e| ChangelogError::cursor(format!("Cannot serialize cursor: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write then rename so an interrupted save never leaves a truncated cursor
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        log::debug!(
            "Saved cursor {} to {}",
            cursor.last_processed_hash,
            self.path.display()
        );
        Ok(())
    }
}

/// In-process cursor store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryCursorStore {
    cursor: RefCell<Option<Cursor>>,
}

impl MemoryCursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(cursor: Cursor) -> Self {
        MemoryCursorStore {
            cursor: RefCell::new(Some(cursor)),
        }
    }

    /// Current stored cursor, without going through [CursorStore::load]
    pub fn current(&self) -> Option<Cursor> {
        self.cursor.borrow().clone()
    }
}

impl CursorStore for MemoryCursorStore {
    fn load(&self) -> Option<Cursor> {
        self.current()
    }

    fn save(&self, cursor: &Cursor) -> Result<()> {
        *self.cursor.borrow_mut() = Some(cursor.clone());
        Ok(())
    }
}
