//! User interface module - human-facing narration of a run.
//!
//! Everything here is output only; the tool never prompts since it runs
//! unattended in CI.

pub mod formatter;

pub use formatter::{
    classification_line, display_boundary_warning, display_classifications,
    display_commit_analysis, display_error, display_proposed_version, display_status,
    display_success, display_tally, tally_line,
};
