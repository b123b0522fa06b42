// src/metrics/mod.rs
//! Structural metrics over a pathway.
//!
//! Every calculator is a pure function of the pathway value.

pub mod centrality;
pub mod connectivity;
pub mod ranking;

pub use centrality::{
    degree_centrality, directed_degrees, CentralityMap, DirectedDegree, DirectedDegreeMap,
};
pub use connectivity::connectivity_ratio;
pub use ranking::{
    enrich_with_directed, most_influential_node, rank_regulatory_nodes, RankingEntry,
    NO_INFLUENTIAL_NODE,
};

use serde::Serialize;

use crate::graph::Pathway;

/// Rounds half away from zero to `places` decimal digits.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// All metrics computed for one pathway state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBundle {
    pub centrality: CentralityMap,
    pub directed: DirectedDegreeMap,
    pub connectivity: f64,
    /// Ranking enriched with directed degrees.
    pub ranking: Vec<RankingEntry>,
    pub most_influential: String,
}

impl MetricBundle {
    #[must_use]
    pub fn compute(pathway: &Pathway) -> Self {
        let centrality = degree_centrality(pathway);
        let directed = directed_degrees(pathway);
        let connectivity = connectivity_ratio(pathway);
        let ranking = enrich_with_directed(rank_regulatory_nodes(pathway, &centrality), &directed);
        let most_influential = most_influential_node(pathway, &centrality);
        Self {
            centrality,
            directed,
            connectivity,
            ranking,
            most_influential,
        }
    }
}
