//! Domain logic - pure commit interpretation rules independent of git operations

pub mod category;
pub mod commit;
pub mod version;

pub use category::{classify, Category, Classifier};
pub use commit::ClassifiedCommit;
pub use version::{resolve, UNTAGGED};
