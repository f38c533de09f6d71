//! Application services - Use case implementations
//!
//! Each service is a set of pure functions over the CAML domain model: no
//! I/O, no shared state. Outer surfaces (CLI, HTTP) call these directly.

pub mod campaign_export_service;
pub mod campaign_import_service;
pub mod defaults;
pub mod graph_service;
pub mod parser_service;
pub mod validation_service;

pub use campaign_export_service::{convert_bundle_to_caml, convert_campaign_to_caml};
pub use campaign_import_service::convert_caml_to_campaign;
pub use graph_service::{build_adventure_graph, dangling_edges, extract_gate_references};
pub use parser_service::{
    parse_caml, parse_caml_json, parse_caml_yaml, CamlFormat, CamlParser, DocumentShape,
    ParseError,
};
pub use validation_service::{validate_pack, ValidationError, ValidationReport};
