//! Domain models for the firewall policy export.
//!
//! - [`PolicyIdentifier`] - Validated policy OCID
//! - [`Category`] - Object kinds and their commands and file names
//! - [`ListingEntry`] and [`ExportBundle`] - Hand-off and final artifacts

mod category;
mod listing;
mod policy;

// Re-export public types
pub use category::Category;
pub use listing::{read_listing, ExportBundle, ListingEntry};
pub use policy::PolicyIdentifier;
