use std::fmt;

/// Kind of change a commit represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Added,
    Removed,
    Fixed,
    Changed,
    Deprecated,
    Improved,
    Uncategorized,
}

impl Category {
    /// Categories that can be matched by keywords, in priority order
    pub const PRIORITY: [Category; 6] = [
        Category::Added,
        Category::Removed,
        Category::Fixed,
        Category::Changed,
        Category::Deprecated,
        Category::Improved,
    ];

    /// Upper-case heading used in the rendered changelog
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Added => "ADDED",
            Category::Removed => "REMOVED",
            Category::Fixed => "FIXED",
            Category::Changed => "CHANGED",
            Category::Deprecated => "DEPRECATED",
            Category::Improved => "IMPROVED",
            Category::Uncategorized => "UNCATEGORIZED",
        }
    }

    /// Built-in keyword family for a category
    pub fn default_keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Added => &["add"],
            Category::Removed => &["remove", "removing", "delete", "deleting"],
            Category::Fixed => &["fix", "bugfix"],
            Category::Changed => &["change", "changing"],
            Category::Deprecated => &["deprecate", "deprecating"],
            Category::Improved => &["improve", "improving"],
            Category::Uncategorized => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword-driven commit classifier.
///
/// Holds one keyword family per category, checked in [Category::PRIORITY] order.
/// A family matches when a word of the message starts with one of its keywords,
/// compared case-insensitively, so `fix` covers `fixed`, `fixes` and `fixing`.
/// Words are runs of alphanumeric characters: `fix(parser): ...` yields `fix`,
/// while `prefix` does not match `fix`.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    families: Vec<(Category, Vec<String>)>,
}

impl Classifier {
    /// Build a classifier from keyword lists given in priority order.
    ///
    /// Keywords are lower-cased; empty keywords are dropped.
    pub fn new(families: Vec<(Category, Vec<String>)>) -> Self {
        let families = families
            .into_iter()
            .map(|(category, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (category, keywords)
            })
            .collect();

        Classifier { families }
    }

    /// Determine the category of a commit message
    pub fn classify(&self, message: &str) -> Category {
        let lowered = message.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Category::Uncategorized;
        }

        self.families
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|k| words.iter().any(|w| w.starts_with(k.as_str())))
            })
            .map(|(category, _)| *category)
            .unwrap_or(Category::Uncategorized)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(
            Category::PRIORITY
                .iter()
                .map(|c| {
                    let keywords = c.default_keywords().iter().map(|k| k.to_string()).collect();
                    (*c, keywords)
                })
                .collect(),
        )
    }
}

/// Classify a commit message with the built-in keyword families
pub fn classify(message: &str) -> Category {
    Classifier::default().classify(message)
}
