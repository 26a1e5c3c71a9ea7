//! Hydration: one `oci ... get` per listing entry.

use super::in_blocking;
use crate::error::{ExportError, Result};
use crate::models::{read_listing, ExportBundle};
use crate::oci::{self, template, CommandExecutor, CommandTemplate};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::Path;
use std::sync::Arc;

/// Fetches detail records for the entries of a listing file.
pub struct Hydrator {
    executor: Arc<dyn CommandExecutor>,
    oci_bin: String,
    workers: usize,
}

impl Hydrator {
    /// `workers` bounds the number of detail fetches in flight; `1` is
    /// strictly sequential.
    pub fn new(executor: Arc<dyn CommandExecutor>, oci_bin: &str, workers: usize) -> Self {
        Hydrator {
            executor,
            oci_bin: oci_bin.to_string(),
            workers: workers.max(1),
        }
    }

    /// Hydrate every entry of `listing_path` and write the bundle to
    /// `output_path`.
    ///
    /// Records keep listing order. The first failing fetch aborts the pass and
    /// nothing is written.
    ///
    /// # Arguments
    /// * `listing_path` - Listing file written by the list phase
    /// * `output_path` - Where the JSON array of detail records goes
    /// * `detail_template` - The `get` command with name and parent placeholders
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records written
    /// * `Err` - If the listing is malformed, a fetch fails, or the write fails
    pub async fn hydrate(
        &self,
        listing_path: &Path,
        output_path: &Path,
        detail_template: &CommandTemplate,
    ) -> Result<usize> {
        let entries = read_listing(listing_path)?;
        log::info!(
            "Hydrating {} entries from {} with {} worker(s)",
            entries.len(),
            listing_path.display(),
            self.workers
        );

        let commands = entries.iter().map(|entry| {
            detail_template.render(
                &self.oci_bin,
                &[
                    (template::PARENT_RESOURCE_ID, entry.parent_resource_id.as_str()),
                    (template::NAME, entry.name.as_str()),
                ],
            )
        });

        let bundle: ExportBundle = stream::iter(commands.enumerate())
            .map(|(i, command)| {
                let executor = Arc::clone(&self.executor);
                async move {
                    log::debug!("detail fetch #{i}: {command}");
                    in_blocking(move || oci::run_capturing(executor.as_ref(), &command)).await
                }
            })
            .buffered(self.workers)
            .try_collect()
            .await?;

        write_bundle(output_path, &bundle)?;
        Ok(bundle.len())
    }
}

/// Serialize the bundle as one JSON array, replacing any existing file.
fn write_bundle(path: &Path, bundle: &ExportBundle) -> Result<()> {
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string(bundle).map_err(|e| io_error(e.into()))?;
    std::fs::write(path, json).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::tests::FakeOci;
    use serde_json::Value;
    use std::path::PathBuf;

    const THREE_RULES: &str = "src/tests/test_data/security_rule.json";

    fn scratch() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("security_rule_output.json");
        (dir, output)
    }

    fn read_bundle(path: &Path) -> Vec<Value> {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_hydrate_one_fetch_per_entry_in_order() {
        let (_dir, output) = scratch();
        let fake = Arc::new(FakeOci::default());
        let hydrator = Hydrator::new(fake.clone(), "oci", 1);

        let count = hydrator
            .hydrate(
                Path::new(THREE_RULES),
                &output,
                &Category::SecurityRule.detail_template(),
            )
            .await
            .unwrap();

        assert_eq!(count, 3);
        let calls = fake.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].args[4], "ocid1.networkfirewallpolicy.oc1.iad.test01");
        assert_eq!(calls[0].args[5], "--security-rule-name");

        let names: Vec<_> = read_bundle(&output)
            .iter()
            .map(|r| r["data"]["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["allow-dns", "allow-web", "deny-all"]);
    }

    #[tokio::test]
    async fn test_hydrate_parallel_keeps_listing_order() {
        let dir = tempfile::tempdir().unwrap();
        let listing = dir.path().join("service.json");
        let items: Vec<Value> = (0..20)
            .map(|i| serde_json::json!({"name": format!("svc-{i:02}"), "parent-resource-id": "p1"}))
            .collect();
        std::fs::write(
            &listing,
            serde_json::json!({"data": {"items": items}}).to_string(),
        )
        .unwrap();
        let output = dir.path().join("service_output.json");
        let fake = Arc::new(FakeOci::default().with_jitter());
        let hydrator = Hydrator::new(fake.clone(), "oci", 4);

        let count = hydrator
            .hydrate(&listing, &output, &Category::Service.detail_template())
            .await
            .unwrap();

        assert_eq!(count, 20);
        assert_eq!(fake.calls().len(), 20);
        let bundle = read_bundle(&output);
        for (i, record) in bundle.iter().enumerate() {
            assert_eq!(record["data"]["name"], format!("svc-{i:02}"));
        }
    }

    #[tokio::test]
    async fn test_hydrate_empty_listing_writes_empty_array() {
        let (_dir, output) = scratch();
        let fake = Arc::new(FakeOci::default());
        let hydrator = Hydrator::new(fake.clone(), "oci", 1);

        let count = hydrator
            .hydrate(
                Path::new("src/tests/test_data/listing_no_items.json"),
                &output,
                &Category::SecurityRule.detail_template(),
            )
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert!(fake.calls().is_empty());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_hydrate_non_json_detail_aborts_without_output() {
        let (_dir, output) = scratch();
        let fake = Arc::new(FakeOci::default().with_failing_detail("allow-web"));
        let hydrator = Hydrator::new(fake.clone(), "oci", 1);

        let err = hydrator
            .hydrate(
                Path::new(THREE_RULES),
                &output,
                &Category::SecurityRule.detail_template(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Parse { .. }), "{err:?}");
        assert_eq!(fake.calls().len(), 2, "deny-all must not be fetched");
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_hydrate_failure_leaves_previous_output_untouched() {
        let (_dir, output) = scratch();
        std::fs::write(&output, "[\"previous\"]").unwrap();
        let fake = Arc::new(FakeOci::default().with_failing_detail("allow-dns"));
        let hydrator = Hydrator::new(fake, "oci", 1);

        assert!(hydrator
            .hydrate(
                Path::new(THREE_RULES),
                &output,
                &Category::SecurityRule.detail_template(),
            )
            .await
            .is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "[\"previous\"]");
    }

    #[tokio::test]
    async fn test_hydrate_missing_listing() {
        let (dir, output) = scratch();
        let fake = Arc::new(FakeOci::default());
        let hydrator = Hydrator::new(fake.clone(), "oci", 1);

        let err = hydrator
            .hydrate(
                &dir.path().join("security_rule.json"),
                &output,
                &Category::SecurityRule.detail_template(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::MalformedListing { .. }), "{err:?}");
        assert!(fake.calls().is_empty());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_hydrate_twice_is_byte_identical() {
        let (dir, output) = scratch();
        let second = dir.path().join("second.json");
        let hydrator = Hydrator::new(Arc::new(FakeOci::default()), "oci", 2);
        let template = Category::SecurityRule.detail_template();

        hydrator
            .hydrate(Path::new(THREE_RULES), &output, &template)
            .await
            .unwrap();
        hydrator
            .hydrate(Path::new(THREE_RULES), &second, &template)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), std::fs::read(&second).unwrap());
    }
}
