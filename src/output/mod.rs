//! Operator-facing output.
//!
//! - [`terminal`] - Progress lines and summary formatting

mod terminal;

pub use terminal::{format_count_row, phase, success};
