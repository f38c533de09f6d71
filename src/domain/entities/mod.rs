//! Domain entities - the CAML entity kinds

mod adventure;
mod base;
mod encounter;
mod entity;
mod faction;
mod handout;
mod item;
mod location;
mod npc;
mod quest;

pub use adventure::AdventureModule;
pub use base::EntityBase;
pub use encounter::{Encounter, EncounterDifficulty, EncounterType, EnemyGroup, Rewards};
pub use entity::{Entity, ExtensionEntity};
pub use faction::Faction;
pub use handout::Handout;
pub use item::{Attunement, Item, ItemType, Rarity};
pub use location::{Location, LocationConnection};
pub use npc::{AbilityScores, Attitude, Defenses, Npc, NpcAction, Spellcasting, Statblock};
pub use quest::{Quest, QuestObjective, QuestStage};
