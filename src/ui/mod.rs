//! User interface module - console output for the release workflow.

pub mod formatter;

pub use formatter::{
    display_error, display_followups, display_heading, display_outcome, display_progress,
    display_status, display_success, outcome_text,
};
