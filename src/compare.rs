// src/compare.rs
//! Before/after reconciliation of metric outputs.

use serde::Serialize;

use crate::graph::{Edge, NodeMap, Pathway};
use crate::metrics::{round_to, CentralityMap, RankingEntry};
use crate::perturb::{Perturbation, PerturbationKind};

/// Node id -> change in combined degree.
pub type CentralityDelta = NodeMap<i64>;

/// Computes `after - before` for every id in either map. Absent ids read as
/// zero, so knocked-out nodes show their full loss.
#[must_use]
pub fn centrality_delta(before: &CentralityMap, after: &CentralityMap) -> CentralityDelta {
    let mut delta = CentralityDelta::with_capacity(before.len());
    for id in before.keys().chain(after.keys()) {
        if delta.contains(id) {
            continue;
        }
        delta.insert(id, signed(after.get_or_default(id)) - signed(before.get_or_default(id)));
    }
    delta
}

/// Relative change of the connectivity percentage, rounded to two decimals.
/// Zero when there was no connectivity to begin with.
#[must_use]
pub fn connectivity_delta(before: f64, after: f64) -> f64 {
    if before > 0.0 {
        round_to((after - before) / before * 100.0, 2)
    } else {
        0.0
    }
}

/// Top `count` node ids of a ranking.
#[must_use]
pub fn high_centrality_nodes(ranking: &[RankingEntry], count: usize) -> Vec<String> {
    ranking.iter().take(count).map(|e| e.node_id.clone()).collect()
}

/// Edges in `original` incident to `node_id`.
#[must_use]
pub fn lost_edges(original: &Pathway, node_id: &str) -> usize {
    original.incident_edge_count(node_id)
}

/// Edge counts by interaction type, with absent types read as activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeTypeCounts {
    pub activation: usize,
    pub inhibition: usize,
    pub other: usize,
}

impl EdgeTypeCounts {
    #[must_use]
    pub fn of(pathway: &Pathway) -> Self {
        let mut counts = Self::default();
        for edge in &pathway.edges {
            match edge.kind() {
                Edge::ACTIVATION => counts.activation += 1,
                Edge::INHIBITION => counts.inhibition += 1,
                _ => counts.other += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeTypeComparison {
    pub before: EdgeTypeCounts,
    pub after: EdgeTypeCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralSummary {
    pub original_node_count: usize,
    pub original_edge_count: usize,
    pub perturbed_node_count: usize,
    pub perturbed_edge_count: usize,
    /// Counted on the original pathway; zero for overexpression.
    pub lost_edges: usize,
    pub edge_types: EdgeTypeComparison,
}

impl StructuralSummary {
    #[must_use]
    pub fn compute(original: &Pathway, perturbed: &Pathway, perturbation: &Perturbation) -> Self {
        let lost = match perturbation.kind {
            PerturbationKind::Knockout => lost_edges(original, &perturbation.node_id),
            PerturbationKind::Overexpression => 0,
        };
        Self {
            original_node_count: original.nodes.len(),
            original_edge_count: original.edges.len(),
            perturbed_node_count: perturbed.nodes.len(),
            perturbed_edge_count: perturbed.edges.len(),
            lost_edges: lost,
            edge_types: EdgeTypeComparison {
                before: EdgeTypeCounts::of(original),
                after: EdgeTypeCounts::of(perturbed),
            },
        }
    }
}

fn signed(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
