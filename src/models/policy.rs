//! Network firewall policy identifier.

use crate::config::POLICY_ID_PATTERN;
use crate::error::{ExportError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static POLICY_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_policy_id_regex() -> &'static Regex {
    POLICY_ID_REGEX.get_or_init(|| Regex::new(POLICY_ID_PATTERN).expect("Invalid Regex"))
}

/// A validated `ocid1.networkfirewallpolicy.oc1.` OCID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyIdentifier(String);

impl PolicyIdentifier {
    /// Validate user input. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let candidate = input.trim();
        if get_policy_id_regex().is_match(candidate) {
            Ok(PolicyIdentifier(candidate.to_string()))
        } else {
            Err(ExportError::Validation(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
