pub mod orchestration;

pub use orchestration::{
    commit_cursor, prepare_changelog, run_changelog_workflow, ChangelogWorkflowArgs,
    WorkflowResult,
};
