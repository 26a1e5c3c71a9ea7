//! Export pipeline logic.
//!
//! - [`lister`] - Writes one listing file per category
//! - [`hydrator`] - Turns a listing into a bundle of full detail records
//! - [`pipeline`] - Runs listing then hydration for every category
//! - [`convert`] - Hands the bundles to the external spreadsheet converter

mod convert;
mod hydrator;
mod lister;
mod pipeline;

// Re-export public functions
pub use convert::run_converter;
pub use hydrator::Hydrator;
pub use lister::list_all;
pub use pipeline::{ExportSummary, Pipeline, PipelineState};

use crate::error::{ExportError, Result};

/// Run blocking subprocess work off the async runtime threads.
async fn in_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ExportError::Worker(e.to_string()))?
}
