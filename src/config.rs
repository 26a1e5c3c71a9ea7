//! Runtime configuration.
//!
//! Values come from the environment (optionally seeded from `.env` by
//! `dotenv` in `main`) and may be overridden by command-line flags.

use std::env;
use std::path::PathBuf;

/// Pattern every network firewall policy OCID must match.
pub const POLICY_ID_PATTERN: &str = r"^ocid1\.networkfirewallpolicy\.oc1\..*$";

pub const DEFAULT_OCI_BIN: &str = "oci";
pub const DEFAULT_CONVERT_CMD: &str = "python3 Convert-Policies.py";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

pub const ENV_OCI_BIN: &str = "OCI_CLI_BIN";
pub const ENV_EXPORT_DIR: &str = "FW_EXPORT_DIR";
pub const ENV_WORKERS: &str = "FW_EXPORT_WORKERS";
pub const ENV_CONVERT_CMD: &str = "FW_CONVERT_CMD";
pub const ENV_LOG_CONFIG: &str = "FW_EXPORT_LOG_CONFIG";

/// Settings shared by the export and convert modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Name or path of the OCI CLI binary.
    pub oci_bin: String,
    /// Directory holding the listing and output files.
    pub output_dir: PathBuf,
    /// Upper bound on concurrent detail fetches within one category.
    pub workers: usize,
    /// Command line of the external JSON to spreadsheet converter.
    pub convert_cmd: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            oci_bin: DEFAULT_OCI_BIN.to_string(),
            output_dir: PathBuf::from("."),
            workers: 1,
            convert_cmd: DEFAULT_CONVERT_CMD.to_string(),
        }
    }
}

impl ExportConfig {
    /// Build a config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ExportConfig::default();
        let workers = match lookup(ENV_WORKERS) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|e| {
                log::warn!("Ignoring {ENV_WORKERS}='{raw}': {e}");
                defaults.workers
            }),
            None => defaults.workers,
        };
        ExportConfig {
            oci_bin: lookup(ENV_OCI_BIN).unwrap_or(defaults.oci_bin),
            output_dir: lookup(ENV_EXPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            workers: workers.max(1),
            convert_cmd: lookup(ENV_CONVERT_CMD).unwrap_or(defaults.convert_cmd),
        }
    }

    /// Location of a file inside the output directory.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
