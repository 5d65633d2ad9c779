use std::sync::LazyLock;

use regex::Regex;

use crate::git::CommitRecord;

/// Label used for commits without a tag or inline version when grouping is enabled
pub const UNTAGGED: &str = "untagged";

/// Inline version marker such as `(v1.2.3)`; the capture keeps the leading `v`
static INLINE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((v[^)]+)\)").expect("inline version pattern is valid"));

/// Extract the first inline version marker from a commit message.
///
/// `"fixed (v1.9) bug Y"` yields `Some("v1.9")`.
pub fn extract_inline_version(message: &str) -> Option<String> {
    INLINE_VERSION
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Determine the version label for a commit.
///
/// In priority order:
/// 1. the first tag on the commit
/// 2. the first inline `(v...)` marker in the message
/// 3. [UNTAGGED] when `group_untagged` is set
/// 4. the commit hash
///
/// Labels are opaque grouping keys; no version comparison happens here.
pub fn resolve(record: &CommitRecord, group_untagged: bool) -> String {
    if let Some(tag) = record.tags.first() {
        return tag.clone();
    }

    if let Some(version) = extract_inline_version(&record.message) {
        return version;
    }

    if group_untagged {
        UNTAGGED.to_string()
    } else {
        record.hash.clone()
    }
}
