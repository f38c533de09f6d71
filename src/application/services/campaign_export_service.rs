//! Campaign Export Service - Synthesize a CAML module from campaign rows
//!
//! Relational campaigns were never stored as CAML, so this is best-effort:
//! - Locations are inferred from the latest session's journey log, one per
//!   entry whose first 50 characters have not been seen yet.
//! - NPCs and quests map one to one, ids slugged from their names.
//! - The latest session's combatants become one "current combat" encounter.
//!
//! The module id is `adventure.<campaign id>`, so re-exporting the same
//! campaign always produces the same root id.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use super::defaults::{self, non_blank};
use crate::application::dto::{
    CampaignExportBundle, CampaignRow, Combatant, JourneyEntry, NpcRow, ParticipantRow, QuestRow,
    SessionRow,
};
use crate::domain::entities::{
    AdventureModule, Attitude, Encounter, EncounterType, EntityBase, Location, Npc, Quest,
    QuestObjective, Statblock,
};
use crate::domain::value_objects::{namespaced_id, slugify, EntityKind, Measure};

pub const CURRENT_COMBAT_ID: &str = "encounter.current_combat";
pub const CURRENT_COMBAT_NAME: &str = "Current Combat";
/// `initialState` key holding the participants' character names
pub const PARTY_FACT: &str = "party";

#[instrument(skip_all, fields(campaign_id = campaign.id))]
pub fn convert_campaign_to_caml(
    campaign: &CampaignRow,
    sessions: &[SessionRow],
    participants: &[ParticipantRow],
    npcs: &[NpcRow],
    quests: &[QuestRow],
) -> AdventureModule {
    let latest = latest_session(sessions);
    if let Some(session) = latest {
        debug!(session_number = session.session_number, "Exporting from latest session");
    }
    let story_state = latest.and_then(|s| s.story_state.as_ref());

    let locations = story_state
        .map(|state| infer_locations(&state.journey_log))
        .unwrap_or_default();
    let encounters: Vec<Encounter> = story_state
        .and_then(|state| current_combat(&state.combatants))
        .into_iter()
        .collect();
    let converted_quests: Vec<Quest> = quests
        .iter()
        .enumerate()
        .map(|(index, row)| convert_quest(index, row))
        .collect();

    let mut initial_state = Map::new();
    let party: Vec<Value> = participants
        .iter()
        .filter_map(|p| non_blank(p.character_name.as_deref()))
        .map(|name| Value::String(name.to_string()))
        .collect();
    if !party.is_empty() {
        initial_state.insert(PARTY_FACT.to_string(), Value::Array(party));
    }
    for (quest, row) in converted_quests.iter().zip(quests) {
        if let Some(status) = non_blank(row.status.as_deref()) {
            initial_state.insert(
                format!("{}.status", quest.base.id),
                Value::String(status.to_string()),
            );
        }
    }

    let module = AdventureModule {
        base: EntityBase {
            id: namespaced_id(EntityKind::AdventureModule, campaign.id),
            description: campaign.description.clone(),
            ..EntityBase::default()
        },
        title: campaign.name.clone(),
        version: Some(defaults::EXPORT_VERSION.to_string()),
        min_level: campaign.min_level.map(Measure::from),
        max_level: campaign.max_level.map(Measure::from),
        setting: campaign.setting.clone(),
        synopsis: campaign.description.clone(),
        starting_location: locations.first().map(|l| l.base.id.clone()),
        locations,
        npcs: npcs
            .iter()
            .enumerate()
            .map(|(index, row)| convert_npc(index, row))
            .collect(),
        encounters,
        quests: converted_quests,
        initial_state: (!initial_state.is_empty()).then_some(initial_state),
        ..AdventureModule::default()
    };

    info!(
        adventure_id = %module.id(),
        locations = module.locations.len(),
        npcs = module.npcs.len(),
        quests = module.quests.len(),
        encounters = module.encounters.len(),
        "Exported campaign to CAML"
    );
    module
}

/// [`convert_campaign_to_caml`] over a deserialized row bundle
pub fn convert_bundle_to_caml(bundle: &CampaignExportBundle) -> AdventureModule {
    convert_campaign_to_caml(
        &bundle.campaign,
        &bundle.sessions,
        &bundle.participants,
        &bundle.npcs,
        &bundle.quests,
    )
}

/// Highest `sessionNumber`; on a tie the later row wins
pub fn latest_session(sessions: &[SessionRow]) -> Option<&SessionRow> {
    sessions.iter().max_by_key(|s| s.session_number)
}

/// One location per journey entry with an unseen 50-character prefix
pub fn infer_locations(journey_log: &[JourneyEntry]) -> Vec<Location> {
    let mut seen = HashSet::new();
    let mut locations = Vec::new();

    for entry in journey_log {
        let prefix: String = entry
            .description
            .chars()
            .take(defaults::LOCATION_DEDUP_PREFIX)
            .collect();
        if !seen.insert(prefix) {
            continue;
        }

        let number = locations.len() + 1;
        locations.push(
            Location::new(
                namespaced_id(EntityKind::Location, number),
                format!("Location {}", number),
            )
            .with_description(entry.description.clone()),
        );
    }

    locations
}

/// The current fight as one encounter; `None` when nobody is fighting
fn current_combat(combatants: &[Combatant]) -> Option<Encounter> {
    if combatants.is_empty() {
        return None;
    }

    let mut groups: IndexMap<String, u32> = IndexMap::new();
    for combatant in combatants.iter().filter(|c| !c.is_player) {
        let slug = slugify(&combatant.name);
        if slug.is_empty() {
            continue;
        }
        *groups.entry(namespaced_id(EntityKind::Npc, slug)).or_insert(0) += 1;
    }

    let encounter = groups.into_iter().fold(
        Encounter::new(CURRENT_COMBAT_ID, CURRENT_COMBAT_NAME).with_type(EncounterType::Combat),
        |encounter, (id, count)| encounter.with_enemy(id, count),
    );
    Some(encounter)
}

/// `<kind>.<slug of name>`, or `<kind>.<index>` when there is no usable name
fn row_id(kind: EntityKind, name: Option<&str>, index: usize) -> String {
    match non_blank(name).map(slugify) {
        Some(slug) => namespaced_id(kind, slug),
        None => namespaced_id(kind, index),
    }
}

fn convert_npc(index: usize, row: &NpcRow) -> Npc {
    let statblock = (row.hp.is_some() || row.ac.is_some()).then(|| Statblock {
        hp: row.hp.map(Measure::from),
        ac: row.ac.map(Measure::from),
        ..Statblock::default()
    });

    Npc {
        base: EntityBase {
            id: row_id(EntityKind::Npc, row.name.as_deref(), index),
            name: row.name.clone(),
            description: row.description.clone(),
            ..EntityBase::default()
        },
        race: row.race.clone(),
        class: row.class.clone(),
        level: row.level.map(Measure::from),
        alignment: row.alignment.clone(),
        attitude: non_blank(row.attitude.as_deref()).map(|raw| Attitude::from(raw.trim())),
        statblock,
        ..Npc::default()
    }
}

fn convert_quest(index: usize, row: &QuestRow) -> Quest {
    Quest {
        base: EntityBase {
            id: row_id(EntityKind::Quest, row.title.as_deref(), index),
            name: row.title.clone(),
            description: row.description.clone(),
            ..EntityBase::default()
        },
        quest_giver: row.giver.clone(),
        objectives: row
            .objectives
            .iter()
            .enumerate()
            .map(|(i, objective)| QuestObjective {
                completed: objective.completed(),
                ..QuestObjective::new(format!("objective.{}", i), objective.description())
            })
            .collect(),
        ..Quest::default()
    }
}
