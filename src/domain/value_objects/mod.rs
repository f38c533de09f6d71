//! Value objects - Immutable objects defined by their attributes

mod entity_kind;
mod fact_state;
mod gate;
mod ids;
pub mod lenient;
mod measure;
mod outcome;

pub use entity_kind::{
    AdventureModuleTag, EncounterTag, EntityKind, FactionTag, HandoutTag, ItemTag, LocationTag,
    NpcTag, QuestTag,
};
pub use fact_state::{is_truthy, FactState};
pub use gate::{Gate, GateCondition, GateExpr, GateOp};
pub use ids::{generated_adventure_id, is_namespaced, namespaced_id, slugify};
pub(crate) use lenient::open_enum;
pub use measure::Measure;
pub use outcome::{OutcomeAction, OutcomeBranch, OutcomeMap, OutcomeStep, Transfer};
