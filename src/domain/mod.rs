//! Domain layer - The CAML entity model with no I/O
//!
//! This layer contains:
//! - Entities: AdventureModule, Location, NPC, Item, Encounter, Quest, Faction, Handout
//! - Value Objects: entity kinds, gates, outcome steps, fact state, ids
//! - Aggregates: the adventure pack and its entity index

pub mod aggregates;
pub mod entities;
pub mod value_objects;
