//! Encounter entity - combat, social scenes, traps and puzzles
//!
//! Branch outcomes can be written under either `resolution` or `outcomes`
//! (the latter lives on the shared base). Both are honored; when both name
//! the same branch, `outcomes` wins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::base::EntityBase;
use crate::domain::value_objects::{
    lenient, open_enum, EncounterTag, Measure, OutcomeBranch, OutcomeMap, OutcomeStep,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    #[serde(rename = "type", default)]
    pub tag: EncounterTag,
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter_type: Option<EncounterType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<EncounterDifficulty>,
    #[serde(
        default,
        deserialize_with = "lenient::records",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enemies: Vec<EnemyGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,
    #[serde(
        default,
        deserialize_with = "lenient::map_of_lists",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolution: Option<OutcomeMap>,
    /// Keys outside the schema, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Encounter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id).with_name(name),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, encounter_type: EncounterType) -> Self {
        self.encounter_type = Some(encounter_type);
        self
    }

    pub fn with_enemy(mut self, id: impl Into<String>, count: u32) -> Self {
        self.enemies.push(EnemyGroup {
            id: id.into(),
            count: Measure::from(count),
        });
        self
    }

    /// Steps for one branch, `outcomes` taking precedence over `resolution`
    pub fn branch(&self, branch: OutcomeBranch) -> Option<&[OutcomeStep]> {
        let key = branch.as_str();
        self.base
            .outcomes
            .as_ref()
            .and_then(|o| o.get(key))
            .or_else(|| self.resolution.as_ref().and_then(|r| r.get(key)))
            .map(Vec::as_slice)
    }

    /// All branches from both fields merged, `outcomes` winning per key
    pub fn resolved_outcomes(&self) -> OutcomeMap {
        let mut merged = self.resolution.clone().unwrap_or_default();
        if let Some(outcomes) = &self.base.outcomes {
            for (key, steps) in outcomes {
                merged.insert(key.clone(), steps.clone());
            }
        }
        merged
    }

    /// Whether both fields define the same branch with different steps
    pub fn has_conflicting_branches(&self) -> bool {
        let (Some(outcomes), Some(resolution)) = (&self.base.outcomes, &self.resolution) else {
            return false;
        };
        outcomes
            .iter()
            .any(|(key, steps)| resolution.get(key).is_some_and(|other| other != steps))
    }
}

open_enum! {
    pub enum EncounterType {
        Combat => "combat",
        Social => "social",
        Exploration => "exploration",
        Puzzle => "puzzle",
        Trap => "trap",
        Treasure => "treasure",
    }
}

open_enum! {
    pub enum EncounterDifficulty {
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
        Deadly => "deadly",
    }
}

/// `count` creatures of the NPC `id`; a bare string is one creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyGroup {
    pub id: String,
    /// Usually a number, sometimes dice (`"1d4+1"`) or prose
    #[serde(default = "default_enemy_count")]
    pub count: Measure,
}

impl EnemyGroup {
    /// Number of creatures, 1 when `count` holds no usable number
    pub fn count(&self) -> u32 {
        self.count.as_u32().unwrap_or(1)
    }
}

impl From<String> for EnemyGroup {
    fn from(id: String) -> Self {
        Self {
            id,
            count: default_enemy_count(),
        }
    }
}

fn default_enemy_count() -> Measure {
    Measure::from(1u32)
}

/// Rewards for an encounter or quest; `reputation` is only used by quests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<Measure>,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<String>,
    /// Reputation change keyed by faction id
    #[serde(
        default,
        deserialize_with = "lenient::integer_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub reputation: IndexMap<String, i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encounter(value: serde_json::Value) -> Encounter {
        serde_json::from_value(value).expect("encounter should deserialize")
    }

    #[test]
    fn test_enemy_count_defaults_to_one() {
        let e = encounter(json!({
            "id": "encounter.ambush",
            "encounterType": "combat",
            "difficulty": "hard",
            "enemies": [{ "id": "npc.goblin", "count": 4 }, { "id": "npc.worg" }]
        }));

        assert_eq!(e.encounter_type, Some(EncounterType::Combat));
        assert_eq!(e.difficulty, Some(EncounterDifficulty::Hard));
        assert_eq!(e.enemies[1].count(), 1);
    }

    #[test]
    fn test_loose_encounter_fields() {
        let e = encounter(json!({
            "id": "encounter.throne",
            "encounterType": "Boss",
            "difficulty": "DEADLY",
            "enemies": ["npc.king", { "id": "npc.guard", "count": "1d4+1" }, { "count": 2 }],
            "rewards": { "xp": "1,800", "gold": "250 gp", "items": "item.crown" },
            "resolution": { "success": { "addTag": "regicide" } },
            "lair": "throne room"
        }));

        assert_eq!(e.encounter_type, Some(EncounterType::Other("Boss".to_string())));
        assert_eq!(e.difficulty, Some(EncounterDifficulty::Deadly));
        let enemies: Vec<_> = e.enemies.iter().map(|g| (g.id.as_str(), g.count())).collect();
        assert_eq!(enemies, vec![("npc.king", 1), ("npc.guard", 1)]);

        let rewards = e.rewards.as_ref().expect("rewards");
        assert_eq!(rewards.gold.as_ref().and_then(Measure::as_u32), Some(250));
        assert_eq!(rewards.items, vec!["item.crown"]);
        assert_eq!(e.branch(OutcomeBranch::Success), Some(&[OutcomeStep::add_tag("regicide")][..]));

        let json = serde_json::to_value(&e).expect("serialize");
        assert_eq!(json["encounterType"], json!("Boss"));
        assert_eq!(json["difficulty"], json!("deadly"));
        assert_eq!(json["lair"], json!("throne room"));
        assert_eq!(json["enemies"][1]["count"], json!("1d4+1"));
    }

    #[test]
    fn test_branch_reads_either_field() {
        let e = encounter(json!({
            "id": "encounter.bridge",
            "resolution": {
                "success": [{ "set": { "bridge.crossed": true } }],
                "failure": [{ "inc": "party.wounds" }]
            },
            "outcomes": {
                "success": [{ "addTag": "bridge_heroes" }]
            }
        }));

        assert_eq!(e.branch(OutcomeBranch::Success), Some(&[OutcomeStep::add_tag("bridge_heroes")][..]));
        assert_eq!(e.branch(OutcomeBranch::Failure).map(<[_]>::len), Some(1));
        assert!(e.branch(OutcomeBranch::Partial).is_none());
        assert!(e.has_conflicting_branches());

        let merged = e.resolved_outcomes();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["success"], vec![OutcomeStep::add_tag("bridge_heroes")]);
    }

    #[test]
    fn test_identical_branches_do_not_conflict() {
        let steps = json!([{ "inc": "party.renown" }]);
        let e = encounter(json!({
            "id": "encounter.feast",
            "resolution": { "success": steps.clone() },
            "outcomes": { "success": steps }
        }));
        assert!(!e.has_conflicting_branches());
    }
}
