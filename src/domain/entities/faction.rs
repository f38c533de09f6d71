//! Faction entity - organisations and their relations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use crate::domain::value_objects::{lenient, FactionTag};

/// A faction; every relation field holds entity ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faction {
    #[serde(rename = "type", default)]
    pub tag: FactionTag,
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub members: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allies: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enemies: Vec<String>,
    /// Location id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub goals: Vec<String>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Faction {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id).with_name(name),
            ..Self::default()
        }
    }

    pub fn with_leader(mut self, npc_id: impl Into<String>) -> Self {
        self.leader = Some(npc_id.into());
        self
    }

    pub fn with_member(mut self, npc_id: impl Into<String>) -> Self {
        self.members.push(npc_id.into());
        self
    }
}
