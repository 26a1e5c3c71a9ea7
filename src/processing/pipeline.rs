//! Export pipeline: list every category, then hydrate each one.

use super::{list_all, Hydrator};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::models::{Category, PolicyIdentifier};
use crate::oci::CommandExecutor;
use crate::output::{phase, success};
use std::sync::Arc;

/// Where a pipeline run currently is. Input validation happens before a
/// [`Pipeline`] exists, so every pipeline starts out `Validated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Validated,
    Listing,
    Hydrating(Category),
    Done,
}

/// Records written per category, in hydration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: Vec<(Category, usize)>,
}

pub struct Pipeline {
    config: ExportConfig,
    policy_id: PolicyIdentifier,
    executor: Arc<dyn CommandExecutor>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(
        config: ExportConfig,
        policy_id: PolicyIdentifier,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Pipeline {
            config,
            policy_id,
            executor,
            state: PipelineState::Validated,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn transition(&mut self, next: PipelineState) {
        log::debug!("pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run both phases. The first failing category stops the run; categories
    /// after it are not attempted and files already written are kept.
    pub async fn run(&mut self) -> Result<ExportSummary> {
        log::info!("#Start export of policy {}", self.policy_id);
        std::fs::create_dir_all(&self.config.output_dir).map_err(|e| ExportError::Io {
            path: self.config.output_dir.clone(),
            source: e,
        })?;

        self.transition(PipelineState::Listing);
        phase(&format!(
            "Listing objects of policy {} ...",
            self.policy_id.as_str()
        ));
        list_all(&self.config, &self.policy_id, Arc::clone(&self.executor)).await?;

        let hydrator = Hydrator::new(
            Arc::clone(&self.executor),
            &self.config.oci_bin,
            self.config.workers,
        );
        let mut summary = ExportSummary::default();

        for category in Category::HYDRATION_ORDER {
            self.transition(PipelineState::Hydrating(category));
            let listing = self.config.path_for(category.listing_file());
            let output = self.config.path_for(category.output_file());

            phase(&format!(
                "Wait while the items from {} are getting exported...",
                category.listing_file()
            ));
            let count = hydrator
                .hydrate(&listing, &output, &category.detail_template())
                .await?;
            success(&format!(
                "Export successful for {count} {category} from {} into {}.",
                category.listing_file(),
                category.output_file()
            ));
            summary.exported.push((category, count));
        }

        self.transition(PipelineState::Done);
        log::info!("#End export: {:?}", summary.exported);
        Ok(summary)
    }
}
