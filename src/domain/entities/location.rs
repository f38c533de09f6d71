//! Location entity - places the party can be

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use crate::domain::value_objects::{lenient, LocationTag};

/// A location in the adventure
///
/// `encounters`, `items` and `npcs` are id lists meaning "this location
/// triggers / holds / contains these entities". They point one way only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "type", default)]
    pub tag: LocationTag,
    #[serde(flatten)]
    pub base: EntityBase,
    /// Location this one sits inside
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::records",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub connections: Vec<LocationConnection>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub features: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub encounters: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub npcs: Vec<String>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id).with_name(name),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.base.description = Some(description.into());
        self
    }

    pub fn with_connection(mut self, connection: LocationConnection) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn with_encounter(mut self, encounter_id: impl Into<String>) -> Self {
        self.encounters.push(encounter_id.into());
        self
    }

    pub fn with_npc(mut self, npc_id: impl Into<String>) -> Self {
        self.npcs.push(npc_id.into());
        self
    }

    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.items.push(item_id.into());
        self
    }
}

/// A directed exit from one location to another
///
/// A bare string is read as an unlabeled exit to that location id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConnection {
    /// Free-text direction ("north", "down the well"), used as the edge label
    #[serde(default)]
    pub direction: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LocationConnection {
    pub fn new(direction: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            direction: direction.into(),
            target: target.into(),
            description: None,
        }
    }
}

impl From<String> for LocationConnection {
    fn from(target: String) -> Self {
        Self::new("", target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loose_location_fields() {
        let location: Location = serde_json::from_value(json!({
            "id": "location.crossroads",
            "name": "Crossroads",
            "connections": ["location.inn", { "direction": "east", "target": "location.mill" }, { "direction": "up" }],
            "npcs": "npc.peddler",
            "ambientSound": "creaking signpost"
        }))
        .expect("loose location should deserialize");

        let targets: Vec<_> = location.connections.iter().map(|c| c.target.as_str()).collect();
        assert_eq!(targets, vec!["location.inn", "location.mill"]);
        assert_eq!(location.connections[0].direction, "");
        assert_eq!(location.npcs, vec!["npc.peddler"]);

        let json = serde_json::to_value(&location).expect("serialize");
        assert_eq!(json["ambientSound"], json!("creaking signpost"));
        assert_eq!(json["type"], json!("Location"));
    }
}
