//! WrldBldr CAML - Adventure interchange for TTRPG campaigns
//!
//! CAML documents describe a complete adventure (locations, NPCs, items,
//! encounters, quests, factions) as one JSON or YAML file. This crate:
//! - Parses CAML text in any of the accepted shapes into an [`AdventurePack`]
//! - Indexes every entity by its namespaced id
//! - Builds a node/edge graph of the adventure
//! - Converts adventures to and from relational campaign records
//! - Serializes modules back to JSON or YAML
//!
//! Every operation is a synchronous, pure transformation over in-memory
//! values.
//!
//! [`AdventurePack`]: domain::aggregates::AdventurePack

pub mod application;
pub mod domain;
pub mod infrastructure;
