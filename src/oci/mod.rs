//! OCI CLI interaction.
//!
//! - [`cli`] - Command execution and JSON capture
//! - [`template`] - Placeholder templates for list and get commands

mod cli;
pub mod template;

// Re-export public types and functions
pub use cli::{run, run_capturing, CommandExecutor, CommandLine, CommandOutput, ProcessExecutor};
pub use template::CommandTemplate;
