//! Shared test doubles.

use crate::error::{ExportError, Result};
use crate::oci::{CommandExecutor, CommandLine, CommandOutput};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

const EMPTY_LISTING: &str = r#"{"data": {"items": []}}"#;

/// Stand-in for the `oci` binary.
///
/// `list` returns the configured listing for the resource (empty by default),
/// `get` echoes the requested name and parent id back as a detail record.
#[derive(Default)]
pub struct FakeOci {
    listings: HashMap<String, String>,
    failing_listings: Vec<String>,
    failing_details: Vec<String>,
    jitter: bool,
    launch_failure: bool,
    calls: Mutex<Vec<CommandLine>>,
}

impl FakeOci {
    pub fn with_listing(mut self, resource: &str, json: &str) -> Self {
        self.listings.insert(resource.to_string(), json.to_string());
        self
    }

    /// The listing of `resource` exits non-zero with nothing on stdout.
    pub fn with_failing_listing(mut self, resource: &str) -> Self {
        self.failing_listings.push(resource.to_string());
        self
    }

    /// Fetching the detail of `name` prints an error message instead of JSON.
    pub fn with_failing_detail(mut self, name: &str) -> Self {
        self.failing_details.push(name.to_string());
        self
    }

    /// Delay each `get` by a name dependent amount so completions interleave.
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    /// Every command fails to start, as if the binary were missing.
    pub fn with_launch_failure(mut self) -> Self {
        self.launch_failure = true;
        self
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }

    fn failed(stderr: &str) -> CommandOutput {
        CommandOutput {
            code: Some(1),
            success: false,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    fn ok(stdout: String) -> CommandOutput {
        CommandOutput {
            code: Some(0),
            success: true,
            stdout,
            stderr: String::new(),
        }
    }
}

impl CommandExecutor for FakeOci {
    fn execute(&self, command: &CommandLine) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());
        if self.launch_failure {
            return Err(ExportError::Execution {
                command: command.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
            });
        }

        let resource = command.args.get(1).cloned().unwrap_or_default();
        match command.args.get(2).map(String::as_str) {
            Some("list") => {
                if self.failing_listings.contains(&resource) {
                    return Ok(Self::failed("ServiceError: NotAuthorizedOrNotFound"));
                }
                let listing = self
                    .listings
                    .get(&resource)
                    .cloned()
                    .unwrap_or_else(|| EMPTY_LISTING.to_string());
                Ok(Self::ok(listing))
            }
            Some("get") => {
                let parent = command.args.get(4).cloned().unwrap_or_default();
                let name = command.args.last().cloned().unwrap_or_default();
                if self.jitter {
                    let delay = name.bytes().map(u64::from).sum::<u64>() % 7;
                    std::thread::sleep(Duration::from_millis(delay * 3));
                }
                if self.failing_details.contains(&name) {
                    let mut output = Self::failed("");
                    output.stdout = "ServiceError: status 404, NotAuthorizedOrNotFound".to_string();
                    return Ok(output);
                }
                let record = json!({
                    "data": {
                        "name": name,
                        "parent-resource-id": parent,
                        "resource": resource,
                    },
                    "etag": format!("etag-{name}"),
                });
                Ok(Self::ok(record.to_string()))
            }
            _ => Ok(Self::ok(String::new())),
        }
    }
}
