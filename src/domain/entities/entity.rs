//! The entity sum type, dispatched on the CAML `type` tag

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use super::{AdventureModule, Encounter, Faction, Handout, Item, Location, Npc, Quest};
use crate::domain::value_objects::EntityKind;

/// Any CAML entity
///
/// Reserved kinds (StateFact, PC, Spell, ...) have no schema yet and are
/// carried as [`ExtensionEntity`] with their extra fields intact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    AdventureModule(Box<AdventureModule>),
    Location(Location),
    Npc(Npc),
    Item(Item),
    Encounter(Encounter),
    Quest(Quest),
    Faction(Faction),
    Handout(Handout),
    Extension(ExtensionEntity),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::AdventureModule(_) => EntityKind::AdventureModule,
            Self::Location(_) => EntityKind::Location,
            Self::Npc(_) => EntityKind::Npc,
            Self::Item(_) => EntityKind::Item,
            Self::Encounter(_) => EntityKind::Encounter,
            Self::Quest(_) => EntityKind::Quest,
            Self::Faction(_) => EntityKind::Faction,
            Self::Handout(_) => EntityKind::Handout,
            Self::Extension(e) => e.kind,
        }
    }

    pub fn base(&self) -> &EntityBase {
        match self {
            Self::AdventureModule(m) => &m.base,
            Self::Location(l) => &l.base,
            Self::Npc(n) => &n.base,
            Self::Item(i) => &i.base,
            Self::Encounter(e) => &e.base,
            Self::Quest(q) => &q.base,
            Self::Faction(f) => &f.base,
            Self::Handout(h) => &h.base,
            Self::Extension(e) => &e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    /// `name`, falling back to the id
    pub fn display_name(&self) -> &str {
        self.base().display_name()
    }

    /// Build an entity from a JSON value, dispatching on its `type` field
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| serde_json::Error::custom("entity is missing a string `type`"))?
            .parse::<EntityKind>()
            .map_err(serde_json::Error::custom)?;

        Ok(match kind {
            EntityKind::AdventureModule => {
                Self::AdventureModule(Box::new(serde_json::from_value(value)?))
            }
            EntityKind::Location => Self::Location(serde_json::from_value(value)?),
            EntityKind::Npc => Self::Npc(serde_json::from_value(value)?),
            EntityKind::Item => Self::Item(serde_json::from_value(value)?),
            EntityKind::Encounter => Self::Encounter(serde_json::from_value(value)?),
            EntityKind::Quest => Self::Quest(serde_json::from_value(value)?),
            EntityKind::Faction => Self::Faction(serde_json::from_value(value)?),
            EntityKind::Handout => Self::Handout(serde_json::from_value(value)?),
            EntityKind::StateFact
            | EntityKind::Pc
            | EntityKind::Spell
            | EntityKind::Condition
            | EntityKind::ClassFeature
            | EntityKind::MonsterFeature => Self::Extension(serde_json::from_value(value)?),
        })
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

impl From<AdventureModule> for Entity {
    fn from(module: AdventureModule) -> Self {
        Self::AdventureModule(Box::new(module))
    }
}

/// An entity of a reserved kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_on_type_tag() {
        let entity: Entity = serde_json::from_value(json!({
            "id": "npc.innkeeper",
            "type": "NPC",
            "name": "Old Bren"
        }))
        .expect("entity should deserialize");

        assert_eq!(entity.kind(), EntityKind::Npc);
        assert_eq!(entity.display_name(), "Old Bren");
        assert!(matches!(entity, Entity::Npc(_)));
    }

    #[test]
    fn test_reserved_kind_keeps_extra_fields() {
        let raw = json!({
            "id": "spell.fireball",
            "type": "Spell",
            "level": 3,
            "school": "evocation"
        });
        let entity = Entity::from_value(raw.clone()).expect("reserved kinds are accepted");

        assert_eq!(entity.kind(), EntityKind::Spell);
        assert_eq!(entity.display_name(), "spell.fireball");
        assert_eq!(serde_json::to_value(&entity).expect("serialize"), raw);
    }

    #[test]
    fn test_unknown_or_missing_type_is_rejected() {
        assert!(Entity::from_value(json!({ "id": "x.y", "type": "Dragon" })).is_err());
        assert!(Entity::from_value(json!({ "id": "x.y" })).is_err());
    }

    #[test]
    fn test_serialized_entity_carries_type() {
        let entity = Entity::Location(Location::new("location.well", "The Well"));
        let json = serde_json::to_value(&entity).expect("serialize");
        assert_eq!(json["type"], json!("Location"));
    }
}
