//! Terminal output utilities.
//!
//! Progress lines go to stdout for the operator; detail goes to the log.

use colored::Colorize;

/// Announce the start of a phase, followed by a blank line.
pub fn phase(message: &str) {
    println!("{}\n", message.bold());
}

/// Report a finished step, followed by a blank line.
pub fn success(message: &str) {
    println!("{}\n", message.green());
}

/// Right-align a label in a fixed width column.
pub fn format_count_row(label: &str, count: usize, width: usize) -> String {
    format!("{label:>width$}: {count}")
}
