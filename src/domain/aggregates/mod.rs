//! Aggregates - The adventure pack and the entity index derived from it

pub mod adventure_pack;
pub mod entity_index;

pub use adventure_pack::AdventurePack;
pub use entity_index::{
    build_entity_index, build_entity_index_with, find_duplicate_ids, DuplicateId, EntityIndex,
    IndexOptions,
};
