//! NPC entity - non-player characters and monsters

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use crate::domain::value_objects::{lenient, open_enum, Measure, NpcTag};

/// A non-player character
///
/// Ability scores may appear both in `statblock.abilities` and at the top
/// level in `abilities`; consumers prefer the statblock copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    #[serde(rename = "type", default)]
    pub tag: NpcTag,
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statblock: Option<Statblock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<AbilityScores>,
    #[serde(
        default,
        deserialize_with = "lenient::records",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub actions: Vec<NpcAction>,
    #[serde(
        default,
        deserialize_with = "lenient::records",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub bonus_actions: Vec<NpcAction>,
    #[serde(
        default,
        deserialize_with = "lenient::records",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reactions: Vec<NpcAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcasting: Option<Spellcasting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defenses: Option<Defenses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attitude: Option<Attitude>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dialogue: Vec<String>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<String> for NpcAction {
    fn from(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

impl Npc {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id).with_name(name),
            ..Self::default()
        }
    }

    pub fn with_attitude(mut self, attitude: Attitude) -> Self {
        self.attitude = Some(attitude);
        self
    }

    pub fn with_statblock(mut self, statblock: Statblock) -> Self {
        self.statblock = Some(statblock);
        self
    }

    /// Ability scores, preferring the statblock copy over the top-level one
    pub fn ability_scores(&self) -> Option<&AbilityScores> {
        self.statblock
            .as_ref()
            .and_then(|s| s.abilities.as_ref())
            .or(self.abilities.as_ref())
    }
}

open_enum! {
    /// How an NPC regards the party
    pub enum Attitude {
        Friendly => "friendly",
        Neutral => "neutral",
        Hostile => "hostile",
    }
}

/// Combat statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statblock {
    /// Armor class, e.g. `15` or `"15 (natural armor)"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<Measure>,
    /// Hit points, e.g. `59` or `"59 (7d10+21)"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_dice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<AbilityScores>,
    #[serde(
        default,
        deserialize_with = "lenient::integer_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub saves: IndexMap<String, i32>,
    #[serde(
        default,
        deserialize_with = "lenient::integer_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub skills: IndexMap<String, i32>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub senses: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub languages: Vec<String>,
    /// Challenge rating, either numeric or a fraction such as `"1/4"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr: Option<Measure>,
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub proficiency_bonus: Option<i32>,
}

/// The six ability scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(
        rename = "str",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub strength: Option<i32>,
    #[serde(
        rename = "dex",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub dexterity: Option<i32>,
    #[serde(
        rename = "con",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub constitution: Option<i32>,
    #[serde(
        rename = "int",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub intelligence: Option<i32>,
    #[serde(
        rename = "wis",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub wisdom: Option<i32>,
    #[serde(
        rename = "cha",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub charisma: Option<i32>,
}

impl AbilityScores {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            strength: Some(str),
            dexterity: Some(dex),
            constitution: Some(con),
            intelligence: Some(int),
            wisdom: Some(wis),
            charisma: Some(cha),
        }
    }
}

/// A named attack or effect (action, bonus action or reaction)
///
/// A bare string is read as an action with only a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcAction {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub attack_bonus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<String>,
    #[serde(
        rename = "saveDC",
        alias = "saveDc",
        alias = "dc",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub save_dc: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_ability: Option<String>,
}

/// Spellcasting block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spellcasting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(
        rename = "saveDC",
        alias = "saveDc",
        alias = "dc",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub save_dc: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub attack_bonus: Option<i32>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cantrips: Vec<String>,
    /// Spells keyed by spell level
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub spells: IndexMap<String, Vec<String>>,
    /// Slots keyed by spell level
    #[serde(
        default,
        deserialize_with = "lenient::integer_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub slots: IndexMap<String, u32>,
}

/// Damage and condition defenses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defenses {
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub resistances: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub immunities: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub vulnerabilities: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub condition_immunities: Vec<String>,
}
