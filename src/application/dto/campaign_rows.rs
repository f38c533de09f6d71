//! Campaign rows - live relational data handed to the CAML exporter
//!
//! These mirror the campaign tables loosely: storage hands over plain rows
//! and every column the exporter does not need is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRow {
    pub id: i64,
    #[serde(alias = "title", default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub setting: Option<String>,
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub max_level: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRow {
    pub id: i64,
    #[serde(default)]
    pub session_number: u32,
    #[serde(default)]
    pub story_state: Option<StoryState>,
}

/// The session's story state blob; only the journey log and current
/// combatants are read, everything else is kept in `extra`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryState {
    #[serde(default)]
    pub journey_log: Vec<JourneyEntry>,
    #[serde(default)]
    pub combatants: Vec<Combatant>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl JourneyEntry {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            timestamp: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub ac: Option<u32>,
    #[serde(default)]
    pub initiative: Option<i32>,
    /// Player characters are excluded from the synthetic encounter's enemies
    #[serde(default)]
    pub is_player: bool,
}

impl Combatant {
    pub fn enemy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_player: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(alias = "characterClass", default)]
    pub class: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub attitude: Option<String>,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub ac: Option<u32>,
}

impl NpcRow {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "name", default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub giver: Option<String>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveRow>,
}

/// Objectives are stored either as bare text or with a completion flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectiveRow {
    Text(String),
    Detailed {
        #[serde(default)]
        description: String,
        #[serde(default)]
        completed: bool,
    },
}

impl ObjectiveRow {
    pub fn description(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Detailed { description, .. } => description,
        }
    }

    pub fn completed(&self) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Detailed { completed, .. } => *completed,
        }
    }
}

/// All rows needed to export one campaign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignExportBundle {
    pub campaign: CampaignRow,
    #[serde(default)]
    pub sessions: Vec<SessionRow>,
    #[serde(default)]
    pub participants: Vec<ParticipantRow>,
    #[serde(default)]
    pub npcs: Vec<NpcRow>,
    #[serde(default)]
    pub quests: Vec<QuestRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bundle_deserializes_loose_rows() {
        let bundle: CampaignExportBundle = serde_json::from_value(json!({
            "campaign": { "id": 7, "title": "Ashes of Varn" },
            "sessions": [{
                "id": 1,
                "sessionNumber": 2,
                "storyState": {
                    "journeyLog": [{ "description": "The party reached the ford." }],
                    "combatants": [{ "name": "Goblin", "hp": 7 }, { "name": "Aria", "isPlayer": true }],
                    "weather": "rain"
                }
            }],
            "quests": [{
                "name": "Clear the Ford",
                "objectives": ["Scout the bank", { "description": "Drive off goblins", "completed": true }]
            }]
        }))
        .expect("bundle should deserialize");

        assert_eq!(bundle.campaign.name, "Ashes of Varn");
        let state = bundle.sessions[0].story_state.as_ref().expect("story state");
        assert_eq!(state.journey_log.len(), 1);
        assert!(state.combatants[1].is_player);
        assert_eq!(state.extra.get("weather"), Some(&json!("rain")));

        let objectives = &bundle.quests[0].objectives;
        assert_eq!(objectives[0].description(), "Scout the bank");
        assert!(!objectives[0].completed());
        assert!(objectives[1].completed());
    }
}
