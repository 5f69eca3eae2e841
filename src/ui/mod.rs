//! User interface module - what the resolver prints.
//!
//! Standard output carries exactly one line, the resolved reference, so a
//! pipeline can capture it with `$(get-plugin-ref ...)`. Everything meant
//! for humans goes to standard error.

pub mod formatter;

pub use formatter::{display_error, display_ref, display_status, format_error};
