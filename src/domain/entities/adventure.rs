//! AdventureModule - the root container of a CAML document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use super::{Encounter, Faction, Handout, Item, Location, Npc, Quest};
use crate::domain::value_objects::{lenient, AdventureModuleTag, FactState, Measure};

/// A complete adventure
///
/// `initial_state` is an opaque bag carried through unchanged; it seeds the
/// facts gates are evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureModule {
    #[serde(rename = "type", default)]
    pub tag: AdventureModuleTag,
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub hooks: Vec<String>,
    /// Location id where play begins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub npcs: Vec<Npc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub encounters: Vec<Encounter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quests: Vec<Quest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factions: Vec<Faction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handouts: Vec<Handout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<Map<String, Value>>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdventureModule {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(synopsis.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_npc(mut self, npc: Npc) -> Self {
        self.npcs.push(npc);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_encounter(mut self, encounter: Encounter) -> Self {
        self.encounters.push(encounter);
        self
    }

    pub fn with_quest(mut self, quest: Quest) -> Self {
        self.quests.push(quest);
        self
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.factions.push(faction);
        self
    }

    pub fn with_handout(mut self, handout: Handout) -> Self {
        self.handouts.push(handout);
        self
    }

    /// Facts seeded from `initialState`
    pub fn initial_facts(&self) -> FactState {
        self.initial_state
            .clone()
            .map(FactState::from_map)
            .unwrap_or_default()
    }

    /// Total number of entities held in the six indexed arrays
    pub fn indexed_entity_count(&self) -> usize {
        self.locations.len()
            + self.npcs.len()
            + self.items.len()
            + self.encounters.len()
            + self.quests.len()
            + self.factions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_serializes_camel_case_and_skips_empty() {
        let module = AdventureModule::new("adventure.sunken_keep", "The Sunken Keep")
            .with_synopsis("A keep drowned by a vengeful tide")
            .with_location(Location::new("location.gate", "Drowned Gate"));

        let json = serde_json::to_value(&module).expect("serialization should succeed");
        assert_eq!(json["type"], json!("AdventureModule"));
        assert_eq!(json["id"], json!("adventure.sunken_keep"));
        assert_eq!(json["locations"][0]["type"], json!("Location"));
        assert!(json.get("npcs").is_none());
        assert!(json.get("minLevel").is_none());
    }

    #[test]
    fn test_module_deserializes_without_optional_arrays() {
        let module: AdventureModule = serde_json::from_value(json!({
            "id": "adventure.1",
            "type": "AdventureModule",
            "title": "",
            "minLevel": 3,
            "initialState": { "day": 1 }
        }))
        .expect("deserialization should succeed");

        assert_eq!(module.min_level, Some(Measure::from(3u32)));
        assert_eq!(module.indexed_entity_count(), 0);
        assert_eq!(module.initial_facts().get("day"), Some(&json!(1)));
    }
}
