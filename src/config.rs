use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{Category, Classifier};
use crate::error::{ChangelogError, Result};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "changelog.toml";

/// Represents the complete configuration for git-changelog.
///
/// Contains history traversal limits, output formatting, and the keyword families
/// used to classify commits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub categories: CategoriesConfig,
}

fn default_max_commits() -> usize {
    500
}

fn default_true() -> bool {
    true
}

fn default_cache_file() -> String {
    ".changelog.cache".to_string()
}

fn default_release_branches() -> Vec<String> {
    vec!["master".to_string(), "main".to_string()]
}

/// Controls which commits are read and how they are grouped
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HistoryConfig {
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// Group commits without a tag or inline version under `untagged`
    #[serde(default = "default_true")]
    pub group_untagged: bool,

    /// Cursor file, relative to the repository working directory
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Branches a changelog is expected to be generated from
    #[serde(default = "default_release_branches")]
    pub release_branches: Vec<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            max_commits: default_max_commits(),
            group_untagged: true,
            cache_file: default_cache_file(),
            release_branches: default_release_branches(),
        }
    }
}

fn default_output_path() -> String {
    "CHANGELOG.md".to_string()
}

fn default_date_format() -> String {
    "%Y/%-m/%-d".to_string()
}

/// Controls how the changelog is rendered and where it goes
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Append the short commit hash to every entry
    #[serde(default)]
    pub detail: bool,

    /// chrono format string for the version date
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: default_output_path(),
            detail: false,
            date_format: default_date_format(),
        }
    }
}

fn keywords(category: Category) -> Vec<String> {
    category
        .default_keywords()
        .iter()
        .map(|k| k.to_string())
        .collect()
}

fn default_added() -> Vec<String> {
    keywords(Category::Added)
}

fn default_removed() -> Vec<String> {
    keywords(Category::Removed)
}

fn default_fixed() -> Vec<String> {
    keywords(Category::Fixed)
}

fn default_changed() -> Vec<String> {
    keywords(Category::Changed)
}

fn default_deprecated() -> Vec<String> {
    keywords(Category::Deprecated)
}

fn default_improved() -> Vec<String> {
    keywords(Category::Improved)
}

/// Keyword families per category.
///
/// A section left out of the file keeps its built-in keywords.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CategoriesConfig {
    #[serde(default = "default_added")]
    pub added: Vec<String>,

    #[serde(default = "default_removed")]
    pub removed: Vec<String>,

    #[serde(default = "default_fixed")]
    pub fixed: Vec<String>,

    #[serde(default = "default_changed")]
    pub changed: Vec<String>,

    #[serde(default = "default_deprecated")]
    pub deprecated: Vec<String>,

    #[serde(default = "default_improved")]
    pub improved: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        CategoriesConfig {
            added: default_added(),
            removed: default_removed(),
            fixed: default_fixed(),
            changed: default_changed(),
            deprecated: default_deprecated(),
            improved: default_improved(),
        }
    }
}

impl CategoriesConfig {
    /// Build a classifier that checks the families in priority order
    pub fn classifier(&self) -> Classifier {
        Classifier::new(vec![
            (Category::Added, self.added.clone()),
            (Category::Removed, self.removed.clone()),
            (Category::Fixed, self.fixed.clone()),
            (Category::Changed, self.changed.clone()),
            (Category::Deprecated, self.deprecated.clone()),
            (Category::Improved, self.improved.clone()),
        ])
    }
}

impl Config {
    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.history.max_commits == 0 {
            return Err(ChangelogError::config("history.max_commits must be positive"));
        }
        if self.history.cache_file.trim().is_empty() {
            return Err(ChangelogError::config("history.cache_file must not be empty"));
        }
        if self.output.path.trim().is_empty() {
            return Err(ChangelogError::config("output.path must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `.changelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let (source, config_str) = if let Some(path) = config_path {
        (path.to_string(), read_config_file(Path::new(path))?)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        (
            CONFIG_FILE_NAME.to_string(),
            read_config_file(Path::new(CONFIG_FILE_NAME))?,
        )
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            (
                config_path.display().to_string(),
                read_config_file(&config_path)?,
            )
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    log::debug!("Loading configuration from {}", source);

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ChangelogError::config(format!("Cannot parse {}: {}", source, e)))?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ChangelogError::config(format!("Cannot read {}: {}", path.display(), e))
    })
}
