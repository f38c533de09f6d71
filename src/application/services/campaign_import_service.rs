//! Campaign Import Service - Flatten a CAML pack into campaign records
//!
//! Conversion is total: every missing field falls back to a value from
//! [`defaults`](super::defaults), nothing here can fail.

use tracing::{info, instrument, warn};

use super::defaults::{self, non_blank};
use crate::application::dto::{
    ConvertedCampaignData, ConvertedEncounter, ConvertedItem, ConvertedLocation, ConvertedNpc,
    ConvertedQuest, InitialStoryState, QuestStatus,
};
use crate::domain::aggregates::AdventurePack;
use crate::domain::entities::{AdventureModule, Encounter, EntityBase, Item, Location, Npc, Quest};
use crate::domain::value_objects::Measure;

#[instrument(skip(pack), fields(adventure_id = %pack.id()))]
pub fn convert_caml_to_campaign(pack: &AdventurePack) -> ConvertedCampaignData {
    let adventure = &pack.adventure;

    let data = ConvertedCampaignData {
        title: non_blank(Some(adventure.title.as_str()))
            .or(non_blank(adventure.base.name.as_deref()))
            .unwrap_or(defaults::ADVENTURE_TITLE)
            .to_string(),
        description: non_blank(adventure.synopsis.as_deref())
            .or(non_blank(adventure.base.description.as_deref()))
            .unwrap_or_default()
            .to_string(),
        setting: non_blank(adventure.setting.as_deref())
            .unwrap_or(defaults::SETTING)
            .to_string(),
        min_level: whole_number(adventure.min_level.as_ref()).unwrap_or(defaults::MIN_LEVEL),
        max_level: whole_number(adventure.max_level.as_ref()).unwrap_or(defaults::MAX_LEVEL),
        npcs: adventure.npcs.iter().map(convert_npc).collect(),
        locations: adventure.locations.iter().map(convert_location).collect(),
        encounters: adventure
            .encounters
            .iter()
            .map(|e| convert_encounter(e, adventure))
            .collect(),
        quests: adventure.quests.iter().map(convert_quest).collect(),
        items: adventure.items.iter().map(convert_item).collect(),
        initial_story_state: InitialStoryState {
            caml_adventure_id: adventure.id().to_string(),
            caml_version: adventure.version.clone(),
            starting_location: adventure.starting_location.clone(),
            hooks: adventure.hooks.clone(),
            state: adventure.initial_state.clone().unwrap_or_default(),
            entity_index: pack.entities.ids().map(str::to_string).collect(),
        },
    };

    info!(
        npcs = data.npcs.len(),
        locations = data.locations.len(),
        encounters = data.encounters.len(),
        quests = data.quests.len(),
        items = data.items.len(),
        "Converted CAML adventure to campaign data"
    );
    data
}

fn display_name(base: &EntityBase) -> String {
    base.display_name().to_string()
}

fn description(base: &EntityBase) -> String {
    base.description.clone().unwrap_or_default()
}

fn whole_number(measure: Option<&Measure>) -> Option<u32> {
    measure.and_then(Measure::as_u32)
}

fn convert_npc(npc: &Npc) -> ConvertedNpc {
    let statblock = npc.statblock.as_ref();
    ConvertedNpc {
        caml_id: npc.base.id.clone(),
        name: display_name(&npc.base),
        description: description(&npc.base),
        race: npc.race.clone().unwrap_or_default(),
        class: npc.class.clone().unwrap_or_default(),
        level: whole_number(npc.level.as_ref()).unwrap_or(defaults::NPC_LEVEL),
        alignment: npc.alignment.clone().unwrap_or_default(),
        attitude: npc
            .attitude
            .as_ref()
            .unwrap_or(&defaults::NPC_ATTITUDE)
            .to_string(),
        abilities: npc.ability_scores().copied(),
        hp: whole_number(statblock.and_then(|s| s.hp.as_ref())),
        ac: whole_number(statblock.and_then(|s| s.ac.as_ref())),
        cr: statblock.and_then(|s| s.cr.as_ref()).map(ToString::to_string),
        dialogue: npc.dialogue.clone(),
        statblock: npc.statblock.clone(),
    }
}

fn convert_location(location: &Location) -> ConvertedLocation {
    ConvertedLocation {
        caml_id: location.base.id.clone(),
        name: display_name(&location.base),
        description: description(&location.base),
        parent_location: location.parent_location.clone(),
        features: location.features.clone(),
        connections: location.connections.clone(),
        npcs: location.npcs.clone(),
        encounters: location.encounters.clone(),
        items: location.items.clone(),
    }
}

fn convert_encounter(encounter: &Encounter, adventure: &AdventureModule) -> ConvertedEncounter {
    let id = &encounter.base.id;
    if encounter.has_conflicting_branches() {
        warn!(
            encounter_id = %id,
            "Encounter sets both resolution and outcomes differently, using outcomes"
        );
    }

    ConvertedEncounter {
        caml_id: id.clone(),
        name: display_name(&encounter.base),
        description: description(&encounter.base),
        encounter_type: encounter
            .encounter_type
            .as_ref()
            .unwrap_or(&defaults::ENCOUNTER_TYPE)
            .to_string(),
        difficulty: encounter
            .difficulty
            .as_ref()
            .unwrap_or(&defaults::ENCOUNTER_DIFFICULTY)
            .to_string(),
        location: adventure
            .locations
            .iter()
            .find(|l| l.encounters.iter().any(|e| e == id))
            .map(|l| l.base.id.clone()),
        enemies: encounter.enemies.clone(),
        rewards: encounter.rewards.clone(),
        outcomes: encounter.resolved_outcomes(),
    }
}

fn convert_quest(quest: &Quest) -> ConvertedQuest {
    ConvertedQuest {
        caml_id: quest.base.id.clone(),
        title: display_name(&quest.base),
        description: description(&quest.base),
        status: QuestStatus::Active,
        giver: quest.quest_giver.clone(),
        objectives: quest.objectives.clone(),
        rewards: quest.rewards.clone(),
    }
}

fn convert_item(item: &Item) -> ConvertedItem {
    ConvertedItem {
        caml_id: item.base.id.clone(),
        name: display_name(&item.base),
        description: description(&item.base),
        item_type: item
            .item_type
            .as_ref()
            .unwrap_or(&defaults::ITEM_TYPE)
            .to_string(),
        rarity: item
            .rarity
            .as_ref()
            .unwrap_or(&defaults::ITEM_RARITY)
            .to_string(),
        requires_attunement: item.requires_attunement(),
        properties: item.properties.clone(),
        value: item.value.as_ref().map(ToString::to_string),
        weight: item.weight.as_ref().map(ToString::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AbilityScores, EncounterType, Statblock};
    use crate::domain::value_objects::{Measure, OutcomeMap, OutcomeStep};
    use serde_json::json;

    #[test]
    fn test_empty_module_uses_defaults() {
        let pack = AdventurePack::from_module(AdventureModule::new("adventure.1", ""));
        let data = convert_caml_to_campaign(&pack);

        assert_eq!(data.title, "Imported Adventure");
        assert_eq!(data.description, "");
        assert_eq!(data.setting, "Fantasy");
        assert_eq!((data.min_level, data.max_level), (1, 5));
        assert!(data.npcs.is_empty());
        assert!(data.locations.is_empty());
        assert!(data.encounters.is_empty());
        assert!(data.quests.is_empty());
        assert!(data.items.is_empty());
        assert_eq!(data.initial_story_state.caml_adventure_id, "adventure.1");
        assert_eq!(data.initial_story_state.entity_index, vec!["adventure.1"]);
        assert!(data.initial_story_state.state.is_empty());
    }

    #[test]
    fn test_title_and_description_fallbacks() {
        let mut module = AdventureModule::new("adventure.2", "");
        module.base.name = Some("Named Module".to_string());
        module.base.description = Some("From description".to_string());
        let data = convert_caml_to_campaign(&AdventurePack::from_module(module));

        assert_eq!(data.title, "Named Module");
        assert_eq!(data.description, "From description");

        let module = AdventureModule::new("adventure.3", "Titled").with_synopsis("From synopsis");
        let data = convert_caml_to_campaign(&AdventurePack::from_module(module));
        assert_eq!(data.title, "Titled");
        assert_eq!(data.description, "From synopsis");
    }

    #[test]
    fn test_npc_prefers_statblock_abilities() {
        let mut npc = Npc::new("npc.ogre", "Ogre").with_statblock(Statblock {
            hp: Some(Measure::from("59 (7d10+21)")),
            ac: Some(Measure::from(11u32)),
            cr: Some(Measure::from(2u32)),
            abilities: Some(AbilityScores::new(19, 8, 16, 5, 7, 7)),
            ..Statblock::default()
        });
        npc.abilities = Some(AbilityScores::new(10, 10, 10, 10, 10, 10));

        let pack = AdventurePack::from_module(AdventureModule::new("adventure.o", "O").with_npc(npc));
        let converted = &convert_caml_to_campaign(&pack).npcs[0];

        assert_eq!(converted.caml_id, "npc.ogre");
        assert_eq!(converted.abilities.and_then(|a| a.strength), Some(19));
        assert_eq!((converted.hp, converted.ac), (Some(59), Some(11)));
        assert_eq!(converted.cr.as_deref(), Some("2"));
        assert_eq!(converted.attitude, "neutral");
        assert_eq!(converted.level, 1);
    }

    #[test]
    fn test_encounter_defaults_location_and_outcomes() {
        let mut ambush = Encounter::new("encounter.ambush", "Ambush");
        let mut resolution = OutcomeMap::new();
        resolution.insert("success".to_string(), vec![OutcomeStep::add_tag("ambush_won")]);
        resolution.insert("failure".to_string(), vec![OutcomeStep::add_tag("captured")]);
        ambush.resolution = Some(resolution);
        let mut outcomes = OutcomeMap::new();
        outcomes.insert("success".to_string(), vec![OutcomeStep::set("road.safe", json!(true))]);
        ambush.base.outcomes = Some(outcomes);

        let riddle = Encounter::new("encounter.riddle", "Riddle").with_type(EncounterType::Puzzle);
        let module = AdventureModule::new("adventure.road", "Road")
            .with_location(Location::new("location.road", "Road").with_encounter("encounter.ambush"))
            .with_encounter(ambush)
            .with_encounter(riddle);

        let data = convert_caml_to_campaign(&AdventurePack::from_module(module));
        let ambush = &data.encounters[0];

        assert_eq!(ambush.encounter_type, "combat");
        assert_eq!(ambush.difficulty, "medium");
        assert_eq!(ambush.location.as_deref(), Some("location.road"));
        assert_eq!(
            ambush.outcomes.get("success"),
            Some(&vec![OutcomeStep::set("road.safe", json!(true))])
        );
        assert_eq!(ambush.outcomes.get("failure"), Some(&vec![OutcomeStep::add_tag("captured")]));

        assert_eq!(data.encounters[1].encounter_type, "puzzle");
        assert_eq!(data.encounters[1].location, None);
    }

    #[test]
    fn test_quests_start_active_and_items_flatten() {
        let mut quest = Quest::new("quest.relic", "Find the Relic").with_giver("npc.priest");
        quest.base.tags.push("completed".to_string());
        let mut item: Item = serde_json::from_value(json!({
            "id": "item.relic",
            "name": "Relic",
            "attunement": true,
            "value": "500 gp"
        }))
        .expect("item");
        item.properties.push("glows".to_string());

        let module = AdventureModule::new("adventure.r", "R")
            .with_quest(quest)
            .with_item(item);
        let data = convert_caml_to_campaign(&AdventurePack::from_module(module));

        assert_eq!(data.quests[0].status, QuestStatus::Active);
        assert_eq!(data.quests[0].giver.as_deref(), Some("npc.priest"));
        let item = &data.items[0];
        assert_eq!((item.item_type.as_str(), item.rarity.as_str()), ("misc", "common"));
        assert!(item.requires_attunement);
        assert_eq!(item.value.as_deref(), Some("500 gp"));
    }

    #[test]
    fn test_loose_values_carry_into_records() {
        let module: AdventureModule = serde_json::from_value(json!({
            "id": "adventure.loose",
            "title": "Loose",
            "minLevel": "3rd",
            "maxLevel": "high",
            "npcs": [{ "id": "npc.ogre", "level": "4", "attitude": "Wary", "statblock": { "hp": "59 (7d10+21)" } }],
            "encounters": [{ "id": "encounter.boss", "encounterType": "boss", "difficulty": "Hard" }],
            "items": [{ "id": "item.tonic", "itemType": "potion" }]
        }))
        .expect("loose module");
        let data = convert_caml_to_campaign(&AdventurePack::from_module(module));

        assert_eq!((data.min_level, data.max_level), (3, 5));
        assert_eq!((data.npcs[0].level, data.npcs[0].hp), (4, Some(59)));
        assert_eq!(data.npcs[0].attitude, "Wary");
        assert_eq!(data.encounters[0].encounter_type, "boss");
        assert_eq!(data.encounters[0].difficulty, "hard");
        assert_eq!(data.items[0].item_type, "potion");
    }

    #[test]
    fn test_initial_story_state_carries_caml_context() {
        let mut module = AdventureModule::new("adventure.ctx", "Ctx")
            .with_location(Location::new("location.start", "Start"));
        module.version = Some("2.1.0".to_string());
        module.starting_location = Some("location.start".to_string());
        module.hooks.push("A letter arrives".to_string());
        module.initial_state = json!({ "tags": ["dawn"] }).as_object().cloned();

        let data = convert_caml_to_campaign(&AdventurePack::from_module(module));
        let state = data.initial_story_state;

        assert_eq!(state.caml_version.as_deref(), Some("2.1.0"));
        assert_eq!(state.starting_location.as_deref(), Some("location.start"));
        assert_eq!(state.hooks, vec!["A letter arrives"]);
        assert_eq!(state.state.get("tags"), Some(&json!(["dawn"])));
        assert_eq!(state.entity_index, vec!["adventure.ctx", "location.start"]);
    }
}
