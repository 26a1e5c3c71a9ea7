//! List phase: one `oci ... list` per category.

use super::in_blocking;
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::models::{Category, PolicyIdentifier};
use crate::oci::{self, template, CommandExecutor};
use std::sync::Arc;

/// Write the raw listing output of every category to its listing file.
///
/// Whatever the CLI printed is stored as is; a failed listing shows up later
/// as a malformed listing for that category. Only a CLI that cannot be
/// launched stops this phase.
///
/// # Arguments
/// * `config` - Supplies the CLI binary and the output directory
/// * `policy_id` - The policy whose objects are listed
/// * `executor` - Runs the `oci ... list` commands
///
/// # Returns
/// * `Ok(())` - All six listing files were written
/// * `Err` - If the CLI cannot be launched or a file cannot be written
pub async fn list_all(
    config: &ExportConfig,
    policy_id: &PolicyIdentifier,
    executor: Arc<dyn CommandExecutor>,
) -> Result<()> {
    for category in Category::LISTING_ORDER {
        let command = category
            .list_template()
            .render(&config.oci_bin, &[(template::POLICY_ID, policy_id.as_str())]);
        let executor = Arc::clone(&executor);
        let output = in_blocking(move || oci::run(executor.as_ref(), &command)).await?;

        let path = config.path_for(category.listing_file());
        std::fs::write(&path, &output.stdout).map_err(|e| ExportError::Io {
            path: path.clone(),
            source: e,
        })?;

        if output.success {
            log::info!(
                "Listed {category} into {} ({} bytes)",
                path.display(),
                output.stdout.len()
            );
        } else {
            log::warn!(
                "Listing {category} exited with {:?}, wrote {} anyway",
                output.code,
                path.display()
            );
        }
    }
    Ok(())
}
