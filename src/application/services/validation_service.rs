//! Validation Service - Consistency checks over a parsed adventure
//!
//! Parsing is deliberately permissive. This pass reports what it let
//! through: ids claimed twice, references to ids nothing defines,
//! encounters whose `resolution` and `outcomes` disagree, and handouts
//! that are not reachable through the index.

use serde::Serialize;
use tracing::{info, instrument};

use super::graph_service::{build_adventure_graph, dangling_edges};
use crate::application::dto::GraphEdge;
use crate::domain::aggregates::{find_duplicate_ids, AdventurePack, DuplicateId, IndexOptions};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Adventure {adventure_id} has {count} validation problem(s)")]
    Problems { adventure_id: String, count: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub duplicate_ids: Vec<DuplicateId>,
    /// Graph edges with an endpoint that is not indexed
    pub dangling_references: Vec<GraphEdge>,
    /// Encounter ids whose `resolution` and `outcomes` disagree
    pub conflicting_encounters: Vec<String>,
    pub unindexed_handouts: Vec<String>,
}

impl ValidationReport {
    pub fn problem_count(&self) -> usize {
        self.duplicate_ids.len()
            + self.dangling_references.len()
            + self.conflicting_encounters.len()
            + self.unindexed_handouts.len()
    }

    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }

    pub fn into_result(self, adventure_id: &str) -> Result<Self, ValidationError> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(ValidationError::Problems {
                adventure_id: adventure_id.to_string(),
                count: self.problem_count(),
            })
        }
    }
}

#[instrument(skip(pack), fields(adventure_id = %pack.id()))]
pub fn validate_pack(pack: &AdventurePack) -> ValidationReport {
    let adventure = &pack.adventure;
    let include_handouts = adventure
        .handouts
        .iter()
        .any(|h| !h.base.id.is_empty() && pack.entities.contains(&h.base.id));
    let graph = build_adventure_graph(pack);

    let report = ValidationReport {
        duplicate_ids: find_duplicate_ids(adventure, IndexOptions { include_handouts }),
        dangling_references: dangling_edges(&graph).into_iter().cloned().collect(),
        conflicting_encounters: adventure
            .encounters
            .iter()
            .filter(|e| e.has_conflicting_branches())
            .map(|e| e.base.id.clone())
            .collect(),
        unindexed_handouts: adventure
            .handouts
            .iter()
            .filter(|h| !pack.entities.contains(&h.base.id))
            .map(|h| h.base.id.clone())
            .collect(),
    };

    info!(problems = report.problem_count(), "Validated adventure");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AdventureModule, Encounter, Handout, Location, Npc};
    use crate::domain::value_objects::{EntityKind, OutcomeMap, OutcomeStep};

    #[test]
    fn test_clean_pack() {
        let module = AdventureModule::new("adventure.ok", "Ok")
            .with_location(Location::new("location.a", "A").with_npc("npc.b"))
            .with_npc(Npc::new("npc.b", "B"));
        let report = validate_pack(&AdventurePack::from_module(module));

        assert!(report.is_clean());
        assert!(report.into_result("adventure.ok").is_ok());
    }

    #[test]
    fn test_reports_every_problem_kind() {
        let mut encounter = Encounter::new("encounter.duel", "Duel");
        let mut resolution = OutcomeMap::new();
        resolution.insert("success".to_string(), vec![OutcomeStep::add_tag("won")]);
        let mut outcomes = OutcomeMap::new();
        outcomes.insert("success".to_string(), vec![OutcomeStep::add_tag("champion")]);
        encounter.resolution = Some(resolution);
        encounter.base.outcomes = Some(outcomes);

        let module = AdventureModule::new("adventure.bad", "Bad")
            .with_location(Location::new("shared", "Place").with_npc("npc.missing"))
            .with_npc(Npc::new("shared", "Person"))
            .with_encounter(encounter)
            .with_handout(Handout::new("handout.map", "X marks the spot"));
        let report = validate_pack(&AdventurePack::from_module(module));

        assert_eq!(report.duplicate_ids.len(), 1);
        assert_eq!(
            report.duplicate_ids[0].kinds,
            vec![EntityKind::Location, EntityKind::Npc]
        );
        assert_eq!(report.conflicting_encounters, vec!["encounter.duel"]);
        assert_eq!(report.unindexed_handouts, vec!["handout.map"]);
        assert_eq!(report.problem_count(), 3);

        let err = report.into_result("adventure.bad").expect_err("problems expected");
        assert!(err.to_string().contains("3 validation problem"));
    }

    #[test]
    fn test_dangling_reference() {
        let module = AdventureModule::new("adventure.d", "D")
            .with_location(Location::new("location.a", "A").with_encounter("encounter.gone"));
        let report = validate_pack(&AdventurePack::from_module(module));

        assert_eq!(report.dangling_references.len(), 1);
        assert_eq!(report.dangling_references[0].target, "encounter.gone");
    }
}
