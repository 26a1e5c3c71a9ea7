//! Error taxonomy for the export pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the export can surface. None of them are retried.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The policy identifier does not carry the expected OCID prefix.
    #[error("Invalid Network Firewall Policy ID '{0}'. It should start with 'ocid1.networkfirewallpolicy.oc1.'")]
    Validation(String),

    /// A listing file is absent, not JSON, or has an incomplete entry.
    #[error("Malformed listing {path}: {reason}")]
    MalformedListing { path: PathBuf, reason: String },

    /// A detail fetch printed something that is not a JSON document.
    #[error("Error parsing JSON output of `{command}`: {reason}")]
    Parse { command: String, reason: String },

    /// The external client could not be started at all.
    #[error("Failed to execute `{command}`: {source}")]
    Execution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a listing or output file failed.
    #[error("Error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured value cannot be used, e.g. a blank converter command.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A background fetch task panicked or was cancelled.
    #[error("Detail fetch worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
