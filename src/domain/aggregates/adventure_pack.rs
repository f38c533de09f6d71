//! Adventure pack - a module together with its entity index
//!
//! The pack is a runtime artifact, created per parse or conversion and
//! discarded afterwards. `entities` is a cache: it can always be rebuilt
//! from `adventure`.

use serde::{Deserialize, Serialize};

use super::entity_index::{build_entity_index_with, EntityIndex, IndexOptions};
use crate::domain::entities::{AdventureModule, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdventurePack {
    pub adventure: AdventureModule,
    pub entities: EntityIndex,
}

impl AdventurePack {
    /// Wrap a module, building its index with default options
    pub fn from_module(adventure: AdventureModule) -> Self {
        Self::from_module_with(adventure, IndexOptions::default())
    }

    pub fn from_module_with(adventure: AdventureModule, options: IndexOptions) -> Self {
        let entities = build_entity_index_with(&adventure, options);
        Self {
            adventure,
            entities,
        }
    }

    /// Wrap a module with an index supplied by the document itself
    pub fn with_index(adventure: AdventureModule, entities: EntityIndex) -> Self {
        Self {
            adventure,
            entities,
        }
    }

    pub fn id(&self) -> &str {
        self.adventure.id()
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Replace the index with one derived from `adventure`
    pub fn rebuild_index(&mut self, options: IndexOptions) {
        self.entities = build_entity_index_with(&self.adventure, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Location;

    #[test]
    fn test_pack_index_follows_module() {
        let mut pack = AdventurePack::from_module(
            AdventureModule::new("adventure.x", "X")
                .with_location(Location::new("location.a", "A")),
        );
        assert_eq!(pack.entities.len(), 2);

        pack.adventure.locations.push(Location::new("location.b", "B"));
        assert!(pack.entity("location.b").is_none());

        pack.rebuild_index(IndexOptions::default());
        assert!(pack.entity("location.b").is_some());
    }
}
