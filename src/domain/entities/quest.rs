//! Quest entity - goals with objectives, stages and rewards

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use super::encounter::Rewards;
use crate::domain::value_objects::{lenient, slugify, Gate, QuestTag};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[serde(rename = "type", default)]
    pub tag: QuestTag,
    #[serde(flatten)]
    pub base: EntityBase,
    /// NPC id of whoever hands out the quest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_giver: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::records",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub objectives: Vec<QuestObjective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,
    #[serde(
        default,
        deserialize_with = "lenient::records",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub stages: Vec<QuestStage>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quest {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id).with_name(name),
            ..Self::default()
        }
    }

    pub fn with_giver(mut self, npc_id: impl Into<String>) -> Self {
        self.quest_giver = Some(npc_id.into());
        self
    }

    pub fn with_objective(mut self, objective: QuestObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    /// Whether every required objective is marked completed
    pub fn is_complete(&self) -> bool {
        self.objectives
            .iter()
            .filter(|o| !o.optional)
            .all(|o| o.completed)
    }
}

/// One objective; a bare string is read as the description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestObjective {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::boolean",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub optional: bool,
    #[serde(
        default,
        deserialize_with = "lenient::boolean",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub completed: bool,
}

impl QuestObjective {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            optional: false,
            completed: false,
        }
    }
}

impl From<String> for QuestObjective {
    fn from(description: String) -> Self {
        Self::new(format!("objective.{}", slugify(&description)), description)
    }
}

/// A step of a quest, optionally gated; a bare string is read as the name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestStage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gates: Option<Gate>,
}

impl From<String> for QuestStage {
    fn from(name: String) -> Self {
        Self {
            id: format!("stage.{}", slugify(&name)),
            name,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quest_deserializes_with_reputation_rewards() {
        let quest: Quest = serde_json::from_value(json!({
            "id": "quest.lost_heir",
            "type": "Quest",
            "name": "The Lost Heir",
            "questGiver": "npc.duchess",
            "objectives": [
                { "id": "objective.find", "description": "Find the heir" },
                { "id": "objective.bonus", "description": "Recover the signet", "optional": true }
            ],
            "rewards": { "xp": 500, "reputation": { "faction.crown": 2 } },
            "stages": [{ "id": "stage.1", "name": "Rumors", "gates": { "all": ["quest.lost_heir.started"] } }]
        }))
        .expect("quest should deserialize");

        assert_eq!(quest.quest_giver.as_deref(), Some("npc.duchess"));
        assert_eq!(quest.rewards.as_ref().and_then(|r| r.reputation.get("faction.crown")), Some(&2));
        assert!(quest.stages[0].gates.is_some());
        assert!(!quest.is_complete());
    }

    #[test]
    fn test_optional_objectives_do_not_block_completion() {
        let mut done = QuestObjective::new("objective.1", "Slay the wyrm");
        done.completed = true;
        let mut optional = QuestObjective::new("objective.2", "Spare the eggs");
        optional.optional = true;

        let quest = Quest::new("quest.wyrm", "Wyrm Hunt")
            .with_objective(done)
            .with_objective(optional);
        assert!(quest.is_complete());
    }

    #[test]
    fn test_loose_objectives_and_stages() {
        let quest: Quest = serde_json::from_value(json!({
            "id": "quest.ferry",
            "objectives": [
                "Pay the ferryman",
                { "id": "objective.coin", "description": "Find a silver coin", "optional": "yes" }
            ],
            "stages": "Crossing",
            "rewards": { "xp": "300 XP" },
            "recommendedLevel": 3
        }))
        .expect("loose quest should deserialize");

        assert_eq!(quest.objectives[0].id, "objective.pay_the_ferryman");
        assert_eq!(quest.objectives[0].description, "Pay the ferryman");
        assert!(quest.objectives[1].optional);
        assert_eq!(quest.stages[0].name, "Crossing");
        assert_eq!(
            quest.rewards.as_ref().and_then(|r| r.xp.as_ref()).and_then(|xp| xp.as_u32()),
            Some(300)
        );
        assert_eq!(quest.extra.get("recommendedLevel"), Some(&json!(3)));
    }
}
