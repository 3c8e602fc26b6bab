//! Pure formatting functions for console output.
//!
//! Everything the operator sees goes through here. Styling comes from the
//! `console` crate, which drops colours when the stream is not a terminal.

use console::style;
use std::io::{self, Write};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a bold section heading preceded by a blank line.
pub fn display_heading(message: &str) {
    println!("\n{}", style(message).bold());
}

/// Start a per-file progress line; finish it with [display_outcome].
pub fn display_progress(message: &str) {
    print!("  {}...", message);
    let _ = io::stdout().flush();
}

/// Text closing a progress line
pub fn outcome_text(changed: bool) -> &'static str {
    if changed {
        "done"
    } else {
        "up to date"
    }
}

/// Finish a progress line with "done" or "up to date".
pub fn display_outcome(changed: bool) {
    if changed {
        println!("{}", style(outcome_text(true)).green());
    } else {
        println!("{}", style(outcome_text(false)).dim());
    }
}

/// Print the manual follow-up steps for a release.
///
/// # Arguments
/// * `steps` - One line per manual step
pub fn display_followups(steps: &[String]) {
    if steps.is_empty() {
        return;
    }
    println!("\n{}", style("TODO:").bold().yellow());
    for step in steps {
        println!("  - {}", step);
    }
}
