//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Config: Application configuration
//! - Export: JSON/YAML serializers
//! - Loader: Reading adventure files from disk

pub mod config;
pub mod export;
pub mod loader;
