//! CAML Parser Service
//!
//! Turns raw JSON or YAML text into an [`AdventurePack`]. Input comes from
//! hand-written YAML, AI-generated JSON and previously exported files, so
//! three document shapes are accepted, checked in this order:
//!
//! 1. **Direct module** - `type == "AdventureModule"` or an `id` starting
//!    with `adventure.`; the whole document is the module.
//! 2. **Wrapped module** - an `adventure` key holds the module; `entities`
//!    is used as the index when present and readable.
//! 3. **Bare fields** - a `title` plus at least one of `locations`, `npcs`,
//!    `encounters`, `quests`; the document is tagged as a module.
//!
//! Failures never panic: every error is a [`ParseError`], and
//! [`parse_caml`] collapses them to `None` for callers that only need a
//! presence check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::domain::aggregates::{
    build_entity_index_with, find_duplicate_ids, AdventurePack, EntityIndex, IndexOptions,
};
use crate::domain::entities::AdventureModule;
use crate::domain::value_objects::{generated_adventure_id, is_truthy, EntityKind};

const BARE_FIELD_ARRAYS: [&str; 4] = ["locations", "npcs", "encounters", "quests"];

/// Text format of a CAML document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CamlFormat {
    #[default]
    Json,
    Yaml,
}

impl CamlFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Format for a file extension (`json`, `yaml`, `yml`)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl std::fmt::Display for CamlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CamlFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| anyhow::anyhow!("Invalid CAML format: {}", s))
    }
}

/// Why a document could not be turned into an adventure
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Could not read {format} content: {message}")]
    Syntax { format: CamlFormat, message: String },

    #[error("Document is empty")]
    Empty,

    #[error("Document does not look like an adventure (top-level keys: [{}])", .keys_seen.join(", "))]
    UnrecognizedShape { keys_seen: Vec<String> },

    #[error("Adventure module is malformed: {message}")]
    InvalidModule { message: String },

    #[error("Duplicate entity ids: {}", .ids.join(", "))]
    DuplicateIds { ids: Vec<String> },
}

impl ParseError {
    /// "Could not read this file", as opposed to "read, but not an adventure"
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::Empty)
    }
}

/// Which of the accepted shapes a document matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    DirectModule,
    WrappedModule,
    BareFields,
}

/// Parser with optional strict validation
#[derive(Debug, Clone, Copy, Default)]
pub struct CamlParser {
    strict: bool,
    index_options: IndexOptions,
}

impl CamlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject documents where two indexed entities share an id
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_index_options(mut self, options: IndexOptions) -> Self {
        self.index_options = options;
        self
    }

    /// Parse raw text in the given format
    #[instrument(skip_all, fields(format = %format, bytes = content.len()))]
    pub fn parse(&self, content: &str, format: CamlFormat) -> Result<AdventurePack, ParseError> {
        let value = deserialize(content, format).map_err(|message| {
            warn!(%format, error = %message, "Failed to deserialize CAML document");
            ParseError::Syntax { format, message }
        })?;
        self.parse_value(value)
    }

    /// Parse an already-deserialized document
    pub fn parse_value(&self, value: Value) -> Result<AdventurePack, ParseError> {
        if !is_truthy(&value) {
            warn!("CAML document is empty");
            return Err(ParseError::Empty);
        }

        let Value::Object(mut document) = value else {
            warn!("CAML document is not an object");
            return Err(ParseError::UnrecognizedShape {
                keys_seen: Vec::new(),
            });
        };

        let Some(shape) = detect_shape(&document) else {
            let keys_seen: Vec<String> = document.keys().cloned().collect();
            warn!(keys = ?keys_seen, "CAML document matches no known shape");
            return Err(ParseError::UnrecognizedShape { keys_seen });
        };
        debug!(?shape, "Detected CAML document shape");

        let (module_value, supplied_index) = match shape {
            DocumentShape::DirectModule | DocumentShape::BareFields => {
                document.insert(
                    "type".to_string(),
                    Value::String(EntityKind::AdventureModule.as_str().to_string()),
                );
                (Value::Object(document), None)
            }
            DocumentShape::WrappedModule => {
                let module = document.remove("adventure").unwrap_or(Value::Null);
                let entities = document.remove("entities").filter(is_truthy);
                (module, entities)
            }
        };

        let mut adventure: AdventureModule =
            serde_json::from_value(module_value).map_err(|e| {
                warn!(error = %e, "CAML module failed schema conversion");
                ParseError::InvalidModule {
                    message: e.to_string(),
                }
            })?;

        if adventure.base.id.is_empty() {
            adventure.base.id = generated_adventure_id();
            debug!(id = %adventure.base.id, "Assigned generated adventure id");
        }

        if self.strict {
            let duplicates = find_duplicate_ids(&adventure, self.index_options);
            if !duplicates.is_empty() {
                let ids: Vec<String> = duplicates.into_iter().map(|d| d.id).collect();
                warn!(?ids, "Strict parse rejected duplicate entity ids");
                return Err(ParseError::DuplicateIds { ids });
            }
        }

        let entities = match supplied_index.map(serde_json::from_value::<EntityIndex>) {
            Some(Ok(index)) => index,
            Some(Err(e)) => {
                warn!(error = %e, "Supplied entity index is unreadable, rebuilding it");
                build_entity_index_with(&adventure, self.index_options)
            }
            None => build_entity_index_with(&adventure, self.index_options),
        };

        info!(
            adventure_id = %adventure.id(),
            entities = entities.len(),
            ?shape,
            "Parsed CAML adventure"
        );
        Ok(AdventurePack::with_index(adventure, entities))
    }
}

/// Decide which shape a document has, in priority order
pub fn detect_shape(document: &Map<String, Value>) -> Option<DocumentShape> {
    let tagged_module = document.get("type").and_then(Value::as_str)
        == Some(EntityKind::AdventureModule.as_str());
    let adventure_id = document
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|id| id.starts_with("adventure."));
    if tagged_module || adventure_id {
        return Some(DocumentShape::DirectModule);
    }

    if document.get("adventure").is_some_and(is_truthy) {
        return Some(DocumentShape::WrappedModule);
    }

    let has_title = document.get("title").is_some_and(is_truthy);
    let has_content = BARE_FIELD_ARRAYS
        .iter()
        .any(|key| document.get(*key).is_some_and(is_truthy));
    if has_title && has_content {
        return Some(DocumentShape::BareFields);
    }

    None
}

fn deserialize(content: &str, format: CamlFormat) -> Result<Value, String> {
    match format {
        CamlFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        CamlFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Parse JSON text with default options
pub fn parse_caml_json(content: &str) -> Result<AdventurePack, ParseError> {
    CamlParser::new().parse(content, CamlFormat::Json)
}

/// Parse YAML text with default options
pub fn parse_caml_yaml(content: &str) -> Result<AdventurePack, ParseError> {
    CamlParser::new().parse(content, CamlFormat::Yaml)
}

/// Parse with default options, `None` on any failure (already logged)
pub fn parse_caml(content: &str, format: CamlFormat) -> Option<AdventurePack> {
    CamlParser::new().parse(content, format).ok()
}
