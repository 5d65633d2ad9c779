use crate::domain::category::{Category, Classifier};
use crate::domain::version;
use crate::git::CommitRecord;

/// A commit with its resolved version label and change category
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCommit {
    pub record: CommitRecord,
    pub version: String,
    pub category: Category,
}

impl ClassifiedCommit {
    /// Resolve the version and category of a commit record
    pub fn classify(record: CommitRecord, classifier: &Classifier, group_untagged: bool) -> Self {
        let version = version::resolve(&record, group_untagged);
        let category = classifier.classify(&record.message);

        ClassifiedCommit {
            record,
            version,
            category,
        }
    }
}
