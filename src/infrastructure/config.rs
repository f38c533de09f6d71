//! Application configuration

use std::env;

use anyhow::{Context, Result};

use crate::application::services::{CamlFormat, CamlParser};
use crate::domain::aggregates::IndexOptions;

/// Application configuration loaded from environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Format assumed when a file extension does not decide it
    pub default_format: CamlFormat,
    /// Reject documents with duplicate entity ids
    pub strict: bool,
    /// Index handouts alongside the other entity arrays
    pub index_handouts: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            default_format: lookup("CAML_DEFAULT_FORMAT")
                .unwrap_or_else(|| "json".to_string())
                .parse()
                .context("CAML_DEFAULT_FORMAT must be json or yaml")?,
            strict: parse_flag(lookup("CAML_STRICT"))
                .context("CAML_STRICT must be true or false")?,
            index_handouts: parse_flag(lookup("CAML_INDEX_HANDOUTS"))
                .context("CAML_INDEX_HANDOUTS must be true or false")?,
        })
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            include_handouts: self.index_handouts,
        }
    }

    /// Parser configured from these settings
    pub fn parser(&self) -> CamlParser {
        CamlParser::new()
            .strict(self.strict)
            .with_index_options(self.index_options())
    }
}

fn parse_flag(raw: Option<String>) -> Result<bool> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) => match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("Invalid flag value: {}", other),
        },
    }
}
