//! Changelog assembly: folds classified commits into version and category sections.
//!
//! Sections keep first-seen order. Since commits arrive newest first, the newest
//! version comes first and, within a category, the newest message comes first.

use crate::domain::{Category, ClassifiedCommit};

/// One changelog line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub message: String,
    /// Commit hash, present only when the changelog was assembled in detail mode
    pub hash: Option<String>,
}

/// Entries for one category within a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub category: Category,
    pub entries: Vec<ChangelogEntry>,
}

/// All changes grouped under one version label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSection {
    pub version: String,
    /// Timestamp of the newest commit in this version
    pub timestamp: i64,
    pub categories: Vec<CategorySection>,
}

impl VersionSection {
    fn new(version: &str, timestamp: i64) -> Self {
        VersionSection {
            version: version.to_string(),
            timestamp,
            categories: Vec::new(),
        }
    }

    /// Section for a category, if any commit in this version has it
    pub fn category(&self, category: Category) -> Option<&CategorySection> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Messages recorded under a category, newest first
    pub fn messages(&self, category: Category) -> Vec<&str> {
        self.category(category)
            .map(|section| section.entries.iter().map(|e| e.message.as_str()).collect())
            .unwrap_or_default()
    }

    /// Categories present in this version, in first-seen order
    pub fn category_order(&self) -> Vec<Category> {
        self.categories.iter().map(|c| c.category).collect()
    }

    fn push(&mut self, category: Category, entry: ChangelogEntry) {
        match self.categories.iter_mut().find(|c| c.category == category) {
            Some(section) => section.entries.push(entry),
            None => self.categories.push(CategorySection {
                category,
                entries: vec![entry],
            }),
        }
    }
}

/// Ordered version → category → messages grouping for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    versions: Vec<VersionSection>,
}

impl Changelog {
    /// Fold classified commits (newest first) into a changelog.
    ///
    /// Identical messages are not deduplicated. With `detail` set, each entry
    /// carries its commit hash.
    pub fn assemble(commits: &[ClassifiedCommit], detail: bool) -> Self {
        let mut versions: Vec<VersionSection> = Vec::new();

        for commit in commits {
            let entry = ChangelogEntry {
                message: commit.record.message.clone(),
                hash: detail.then(|| commit.record.hash.clone()),
            };

            let index = match versions.iter().position(|v| v.version == commit.version) {
                Some(index) => index,
                None => {
                    versions.push(VersionSection::new(
                        &commit.version,
                        commit.record.timestamp,
                    ));
                    versions.len() - 1
                }
            };

            versions[index].push(commit.category, entry);
        }

        Changelog { versions }
    }

    pub fn versions(&self) -> &[VersionSection] {
        &self.versions
    }

    /// Version labels in output order
    pub fn labels(&self) -> Vec<&str> {
        self.versions.iter().map(|v| v.version.as_str()).collect()
    }

    pub fn version(&self, label: &str) -> Option<&VersionSection> {
        self.versions.iter().find(|v| v.version == label)
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Number of version sections
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Total number of entries across all versions
    pub fn entry_count(&self) -> usize {
        self.versions
            .iter()
            .flat_map(|v| v.categories.iter())
            .map(|c| c.entries.len())
            .sum()
    }
}
