//! Convert mode: run the external JSON to spreadsheet converter.

use super::in_blocking;
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::oci::{self, CommandExecutor, CommandLine, CommandOutput};
use std::sync::Arc;

/// Run the configured converter inside the output directory, where the
/// `*_output.json` bundles live.
///
/// # Arguments
/// * `config` - Supplies the converter command and the output directory
/// * `executor` - Runs the converter
///
/// # Returns
/// * `Ok(CommandOutput)` - The converter's output, successful or not
/// * `Err` - If the command is blank or cannot be launched
pub async fn run_converter(
    config: &ExportConfig,
    executor: Arc<dyn CommandExecutor>,
) -> Result<CommandOutput> {
    let command = CommandLine::parse(&config.convert_cmd)
        .ok_or_else(|| {
            ExportError::Config(format!("empty converter command '{}'", config.convert_cmd))
        })?
        .in_dir(&config.output_dir);
    log::info!("Calling converter: {command}");
    in_blocking(move || oci::run(executor.as_ref(), &command)).await
}
