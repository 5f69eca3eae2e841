//! Formatting functions for resolver output.

use console::style;

use crate::domain::GitRef;

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a status message with a yellow arrow to stderr.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Print the resolved reference, the only line written to stdout.
pub fn display_ref(git_ref: &GitRef) {
    println!("{}", git_ref);
}
