//! Listing files produced by `oci ... list` and the bundles built from them.

use crate::error::{ExportError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Full detail records for one category, in listing order.
pub type ExportBundle = Vec<Value>;

/// One object named in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub parent_resource_id: String,
}

/// `{ "data": { "items": [ ... ] } }`, every level optional.
#[derive(Deserialize, Debug, Default)]
struct ListingResponse {
    #[serde(default)]
    data: Option<ListingData>,
}

#[derive(Deserialize, Debug, Default)]
struct ListingData {
    #[serde(default)]
    items: Option<Vec<ListingItem>>,
}

#[derive(Deserialize, Debug)]
struct ListingItem {
    name: Option<String>,
    #[serde(rename = "parent-resource-id")]
    parent_resource_id: Option<String>,
}

/// Read a listing file. A missing `data.items` path means zero entries.
pub fn read_listing(path: &Path) -> Result<Vec<ListingEntry>> {
    let malformed = |reason: String| ExportError::MalformedListing {
        path: path.to_path_buf(),
        reason,
    };

    let json = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
    parse_listing(&json).map_err(malformed)
}

fn parse_listing(json: &str) -> std::result::Result<Vec<ListingEntry>, String> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let response: ListingResponse = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("path={} error={}", e.path(), e))?;

    let items = response
        .data
        .and_then(|data| data.items)
        .unwrap_or_default();

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match (item.name, item.parent_resource_id) {
            (Some(name), Some(parent_resource_id)) => Ok(ListingEntry {
                name,
                parent_resource_id,
            }),
            (None, _) => Err(format!("item #{i} has no 'name'")),
            (_, None) => Err(format!("item #{i} has no 'parent-resource-id'")),
        })
        .collect()
}
