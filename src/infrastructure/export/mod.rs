//! Adventure export functionality
//!
//! Serializes a module or a wrapped [`AdventurePack`](crate::domain::aggregates::AdventurePack)
//! to JSON or YAML text. No validation happens here: an inconsistent module
//! serializes without complaint.

mod serializers;

pub use serializers::{export, export_to_json, export_to_yaml, ExportError};
