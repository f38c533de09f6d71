//! Handout entity - letters, maps and notes given to players

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use crate::domain::value_objects::HandoutTag;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handout {
    #[serde(rename = "type", default)]
    pub tag: HandoutTag,
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handout_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Handout {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id),
            content: content.into(),
            ..Self::default()
        }
    }
}
