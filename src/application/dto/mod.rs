//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the outer surfaces (CLI, HTTP) can
//! serialize/deserialize campaign and graph shapes without reaching into the
//! CAML domain model.

pub mod campaign;
pub mod campaign_rows;
pub mod graph;

pub use campaign::*;
pub use campaign_rows::*;
pub use graph::*;
