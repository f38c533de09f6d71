//! Campaign DTOs - the relational campaign shape produced by CAML import
//!
//! Field names follow the campaign tables (`type` instead of
//! `encounterType`, `title` for quests, ...). Every record keeps the CAML
//! id it came from in `camlId`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::{
    AbilityScores, EnemyGroup, LocationConnection, QuestObjective, Rewards, Statblock,
};
use crate::domain::value_objects::OutcomeMap;

/// Everything needed to create a campaign from an imported adventure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedCampaignData {
    pub title: String,
    pub description: String,
    pub setting: String,
    pub min_level: u32,
    pub max_level: u32,
    pub npcs: Vec<ConvertedNpc>,
    pub locations: Vec<ConvertedLocation>,
    pub encounters: Vec<ConvertedEncounter>,
    pub quests: Vec<ConvertedQuest>,
    pub items: Vec<ConvertedItem>,
    pub initial_story_state: InitialStoryState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedNpc {
    pub caml_id: String,
    pub name: String,
    pub description: String,
    pub race: String,
    pub class: String,
    pub level: u32,
    pub alignment: String,
    pub attitude: String,
    pub abilities: Option<AbilityScores>,
    pub hp: Option<u32>,
    pub ac: Option<u32>,
    pub cr: Option<String>,
    pub dialogue: Vec<String>,
    pub statblock: Option<Statblock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedLocation {
    pub caml_id: String,
    pub name: String,
    pub description: String,
    pub parent_location: Option<String>,
    pub features: Vec<String>,
    pub connections: Vec<LocationConnection>,
    pub npcs: Vec<String>,
    pub encounters: Vec<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedEncounter {
    pub caml_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub encounter_type: String,
    pub difficulty: String,
    /// Location whose `encounters` list triggers this encounter
    pub location: Option<String>,
    pub enemies: Vec<EnemyGroup>,
    pub rewards: Option<Rewards>,
    /// `resolution` and `outcomes` merged, `outcomes` winning per branch
    pub outcomes: OutcomeMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedQuest {
    pub caml_id: String,
    pub title: String,
    pub description: String,
    pub status: QuestStatus,
    pub giver: Option<String>,
    pub objectives: Vec<QuestObjective>,
    pub rewards: Option<Rewards>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedItem {
    pub caml_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub rarity: String,
    pub requires_attunement: bool,
    pub properties: Vec<String>,
    pub value: Option<String>,
    pub weight: Option<String>,
}

/// Quest progress as stored by the campaign tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Seed for the first session's story state
///
/// Carries enough of the CAML document that gate and outcome logic can
/// still resolve ids that were not flattened into relational columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialStoryState {
    pub caml_adventure_id: String,
    pub caml_version: Option<String>,
    pub starting_location: Option<String>,
    pub hooks: Vec<String>,
    /// The adventure's `initialState`, renamed
    pub state: Map<String, Value>,
    /// Every indexed entity id
    pub entity_index: Vec<String>,
}
