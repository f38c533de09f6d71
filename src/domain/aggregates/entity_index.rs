//! Entity index - the single source of id resolution
//!
//! The index holds the module itself (keyed by its own id) followed by the
//! entities of its six indexed arrays in the order locations, npcs, items,
//! encounters, quests, factions. A later entity with a repeated id replaces
//! the earlier one but keeps its position.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{AdventureModule, Entity};
use crate::domain::value_objects::EntityKind;

/// `id -> entity` lookup in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityIndex(IndexMap<String, Entity>);

impl EntityIndex {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.0.iter().map(|(id, entity)| (id.as_str(), entity))
    }

    /// Insert under the entity's own id; last write wins
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        self.0.insert(entity.id().to_string(), entity)
    }

    /// Entities of one kind, in index order
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.0.values().filter(move |e| e.kind() == kind)
    }
}

/// Knobs for [`build_entity_index_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Index `handouts` after factions. Off by default, which keeps
    /// handouts invisible to links, gates and the graph.
    pub include_handouts: bool,
}

/// An id claimed by more than one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateId {
    pub id: String,
    /// Kinds of every claimant, in index order
    pub kinds: Vec<EntityKind>,
}

/// Build the index with default options
pub fn build_entity_index(module: &AdventureModule) -> EntityIndex {
    build_entity_index_with(module, IndexOptions::default())
}

pub fn build_entity_index_with(module: &AdventureModule, options: IndexOptions) -> EntityIndex {
    let mut index = EntityIndex::new();
    for entity in indexable_entities(module, options) {
        if entity.id().is_empty() {
            tracing::debug!(kind = %entity.kind(), "Skipping entity without an id");
            continue;
        }
        index.insert(entity);
    }
    index
}

/// Ids that more than one indexed entity claims
pub fn find_duplicate_ids(module: &AdventureModule, options: IndexOptions) -> Vec<DuplicateId> {
    let mut claims: IndexMap<String, Vec<EntityKind>> = IndexMap::new();
    for entity in indexable_entities(module, options) {
        if entity.id().is_empty() {
            continue;
        }
        claims
            .entry(entity.id().to_string())
            .or_default()
            .push(entity.kind());
    }

    claims
        .into_iter()
        .filter(|(_, kinds)| kinds.len() > 1)
        .map(|(id, kinds)| DuplicateId { id, kinds })
        .collect()
}

fn indexable_entities(module: &AdventureModule, options: IndexOptions) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(1 + module.indexed_entity_count());
    entities.push(Entity::from(module.clone()));
    entities.extend(module.locations.iter().cloned().map(Entity::Location));
    entities.extend(module.npcs.iter().cloned().map(Entity::Npc));
    entities.extend(module.items.iter().cloned().map(Entity::Item));
    entities.extend(module.encounters.iter().cloned().map(Entity::Encounter));
    entities.extend(module.quests.iter().cloned().map(Entity::Quest));
    entities.extend(module.factions.iter().cloned().map(Entity::Faction));
    if options.include_handouts {
        entities.extend(module.handouts.iter().cloned().map(Entity::Handout));
    }
    entities
}
