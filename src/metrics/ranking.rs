// src/metrics/ranking.rs
//! Composite regulatory ranking: degree x influence score.

use serde::Serialize;
use std::cmp::Ordering;

use super::centrality::{CentralityMap, DirectedDegreeMap};
use crate::graph::Pathway;

/// Returned by [`most_influential_node`] for an empty pathway.
pub const NO_INFLUENTIAL_NODE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub node_id: String,
    pub degree: usize,
    pub in_degree: usize,
    pub out_degree: usize,
    pub influence_score: f64,
    pub regulatory_score: f64,
}

/// Ranks every node in `centrality` by `degree * influence`, highest first.
///
/// The sort is stable: equal scores keep centrality-map order, which is the
/// pathway's node order. Directed degrees are left at zero; see
/// [`enrich_with_directed`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rank_regulatory_nodes(pathway: &Pathway, centrality: &CentralityMap) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = centrality
        .iter()
        .map(|(id, &degree)| {
            let influence_score = pathway.influence_of(id);
            RankingEntry {
                node_id: id.to_string(),
                degree,
                in_degree: 0,
                out_degree: 0,
                influence_score,
                regulatory_score: degree as f64 * influence_score,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.regulatory_score
            .partial_cmp(&a.regulatory_score)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

/// Fills in/out degree on each entry. Ids missing from `directed` read as zero.
#[must_use]
pub fn enrich_with_directed(
    mut entries: Vec<RankingEntry>,
    directed: &DirectedDegreeMap,
) -> Vec<RankingEntry> {
    for entry in &mut entries {
        let d = directed.get_or_default(&entry.node_id);
        entry.in_degree = d.in_degree;
        entry.out_degree = d.out_degree;
    }
    entries
}

/// Returns the node with the highest `degree * influence`. The first node in
/// pathway order wins ties.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn most_influential_node(pathway: &Pathway, centrality: &CentralityMap) -> String {
    let mut best: Option<&str> = None;
    let mut best_score = -1.0;

    for (id, &degree) in centrality.iter() {
        let score = degree as f64 * pathway.influence_of(id);
        if score > best_score {
            best_score = score;
            best = Some(id);
        }
    }

    best.filter(|id| !id.is_empty())
        .unwrap_or(NO_INFLUENTIAL_NODE)
        .to_string()
}
