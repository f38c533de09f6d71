//! Entity kind discriminant and per-kind `type` tags

use serde::{Deserialize, Serialize};

/// The closed set of CAML `type` tags
///
/// Only the first eight kinds have schema structs; the rest are reserved
/// extension points and travel through the system as `Entity::Extension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    AdventureModule,
    Location,
    #[serde(rename = "NPC")]
    Npc,
    Item,
    Encounter,
    Quest,
    Faction,
    Handout,
    StateFact,
    #[serde(rename = "PC")]
    Pc,
    Spell,
    Condition,
    ClassFeature,
    MonsterFeature,
}

impl EntityKind {
    pub const ALL: [EntityKind; 14] = [
        Self::AdventureModule,
        Self::Location,
        Self::Npc,
        Self::Item,
        Self::Encounter,
        Self::Quest,
        Self::Faction,
        Self::Handout,
        Self::StateFact,
        Self::Pc,
        Self::Spell,
        Self::Condition,
        Self::ClassFeature,
        Self::MonsterFeature,
    ];

    /// The tag exactly as it appears in CAML documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdventureModule => "AdventureModule",
            Self::Location => "Location",
            Self::Npc => "NPC",
            Self::Item => "Item",
            Self::Encounter => "Encounter",
            Self::Quest => "Quest",
            Self::Faction => "Faction",
            Self::Handout => "Handout",
            Self::StateFact => "StateFact",
            Self::Pc => "PC",
            Self::Spell => "Spell",
            Self::Condition => "Condition",
            Self::ClassFeature => "ClassFeature",
            Self::MonsterFeature => "MonsterFeature",
        }
    }

    /// Whether this kind has a dedicated schema struct
    pub fn is_populated(&self) -> bool {
        matches!(
            self,
            Self::AdventureModule
                | Self::Location
                | Self::Npc
                | Self::Item
                | Self::Encounter
                | Self::Quest
                | Self::Faction
                | Self::Handout
        )
    }

    /// Conventional id prefix, e.g. `location` for `location.ruined_tower`
    pub fn id_prefix(&self) -> String {
        match self {
            Self::AdventureModule => "adventure".to_string(),
            other => other.as_str().to_lowercase(),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid entity type: {}", s))
    }
}

/// Defines a zero-sized `type` tag for one entity struct.
///
/// The tag always serializes to its own kind. On input any value is
/// accepted: the collection an entity sits in decides its kind.
macro_rules! define_tag {
    ($name:ident, $kind:expr) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $name {
            pub const KIND: EntityKind = $kind;
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(Self::KIND.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                serde::de::IgnoredAny::deserialize(deserializer)?;
                Ok(Self)
            }
        }
    };
}

define_tag!(AdventureModuleTag, EntityKind::AdventureModule);
define_tag!(LocationTag, EntityKind::Location);
define_tag!(NpcTag, EntityKind::Npc);
define_tag!(ItemTag, EntityKind::Item);
define_tag!(EncounterTag, EntityKind::Encounter);
define_tag!(QuestTag, EntityKind::Quest);
define_tag!(FactionTag, EntityKind::Faction);
define_tag!(HandoutTag, EntityKind::Handout);
