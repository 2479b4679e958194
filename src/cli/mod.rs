//! Command-line facing workflow

pub mod orchestration;

pub use orchestration::{run_and_report, run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
