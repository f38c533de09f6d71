//! Fields shared by every CAML entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{lenient, Gate, OutcomeMap};

/// The common part of every entity, flattened into each entity struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBase {
    /// Namespaced id, e.g. `location.ruined_tower`
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// Explicit, unlabeled relationships to other entity ids
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gates: Option<Gate>,
    #[serde(
        default,
        deserialize_with = "lenient::map_of_lists",
        skip_serializing_if = "Option::is_none"
    )]
    pub outcomes: Option<OutcomeMap>,
}

impl EntityBase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        self.links.push(target.into());
        self
    }

    pub fn with_gates(mut self, gates: Gate) -> Self {
        self.gates = Some(gates);
        self
    }

    /// `name`, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
