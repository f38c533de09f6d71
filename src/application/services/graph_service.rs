//! Adventure Graph Service - Node/edge view of an adventure pack
//!
//! One node per indexed entity, in index order. Edges come from:
//! - `links` (unlabeled)
//! - Location `connections` (labeled with the direction, if any), `encounters`
//!   ("triggers") and `npcs` ("contains")
//! - Quest givers, pointing giver -> quest ("gives")
//! - Namespaced facts read by an entity's gates, pointing fact -> entity
//!   ("unlocks")
//!
//! Edges are emitted whether or not their endpoints are indexed;
//! [`dangling_edges`] reports the ones that are not.

use tracing::{debug, instrument};

use crate::application::dto::{AdventureGraph, GraphEdge, GraphNode};
use crate::domain::aggregates::AdventurePack;
use crate::domain::entities::Entity;
use crate::domain::value_objects::{is_namespaced, Gate};

pub const TRIGGERS_LABEL: &str = "triggers";
pub const CONTAINS_LABEL: &str = "contains";
pub const GIVES_LABEL: &str = "gives";
pub const UNLOCKS_LABEL: &str = "unlocks";

#[instrument(skip(pack), fields(adventure_id = %pack.id()))]
pub fn build_adventure_graph(pack: &AdventurePack) -> AdventureGraph {
    let mut graph = AdventureGraph::default();

    for (id, entity) in pack.entities.iter() {
        graph.nodes.push(GraphNode {
            id: id.to_string(),
            kind: entity.kind(),
            name: entity.display_name().to_string(),
        });

        for link in &entity.base().links {
            graph.edges.push(GraphEdge::unlabeled(id, link));
        }

        match entity {
            Entity::Location(location) => {
                for connection in &location.connections {
                    graph.edges.push(if connection.direction.trim().is_empty() {
                        GraphEdge::unlabeled(id, &connection.target)
                    } else {
                        GraphEdge::labeled(id, &connection.target, &connection.direction)
                    });
                }
                for encounter_id in &location.encounters {
                    graph
                        .edges
                        .push(GraphEdge::labeled(id, encounter_id, TRIGGERS_LABEL));
                }
                for npc_id in &location.npcs {
                    graph
                        .edges
                        .push(GraphEdge::labeled(id, npc_id, CONTAINS_LABEL));
                }
            }
            Entity::Quest(quest) => {
                if let Some(giver) = &quest.quest_giver {
                    graph.edges.push(GraphEdge::labeled(giver, id, GIVES_LABEL));
                }
            }
            _ => {}
        }

        if let Some(gates) = &entity.base().gates {
            for reference in extract_gate_references(gates) {
                graph
                    .edges
                    .push(GraphEdge::labeled(reference, id, UNLOCKS_LABEL));
            }
        }
    }

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Built adventure graph"
    );
    graph
}

/// Namespaced fact references in a gate, in `all`, `any`, `not` order
///
/// Bare strings and `{fact: ..}` objects count when the fact contains a
/// dot. Anything else is skipped.
pub fn extract_gate_references(gate: &Gate) -> Vec<String> {
    gate.conditions()
        .filter_map(|condition| condition.fact())
        .filter(|fact| is_namespaced(fact))
        .map(str::to_string)
        .collect()
}

/// Edges whose source or target is not a node of the graph
pub fn dangling_edges(graph: &AdventureGraph) -> Vec<&GraphEdge> {
    graph
        .edges
        .iter()
        .filter(|edge| graph.node(&edge.source).is_none() || graph.node(&edge.target).is_none())
        .collect()
}
