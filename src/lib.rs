//! Export an OCI network firewall policy to JSON files.
//!
//! The export lists every object category of a policy with the `oci` CLI,
//! then fetches the full record of each listed object and writes one JSON
//! array per category.

pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod models;
pub mod oci;
pub mod output;
pub mod processing;

#[cfg(test)]
mod tests;

use config::ExportConfig;
use error::Result;
use models::PolicyIdentifier;
use oci::CommandExecutor;
use processing::{ExportSummary, Pipeline};
use std::sync::Arc;

/// Run the full export for an already validated policy id.
pub async fn export_policy(
    config: ExportConfig,
    policy_id: PolicyIdentifier,
    executor: Arc<dyn CommandExecutor>,
) -> Result<ExportSummary> {
    let mut pipeline = Pipeline::new(config, policy_id, executor);
    pipeline.run().await
}

/// One aligned line per exported category.
pub fn summary_lines(summary: &ExportSummary) -> Vec<String> {
    summary
        .exported
        .iter()
        .map(|(category, count)| output::format_count_row(&category.to_string(), *count, 20))
        .collect()
}
