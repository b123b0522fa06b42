// src/metrics/centrality.rs
//! Degree centrality and directed in/out degree.
//!
//! Edges whose endpoint names no known node contribute nothing to that
//! endpoint. A self-loop counts once as source and once as target.

use serde::Serialize;

use crate::graph::{NodeMap, Pathway};

/// Node id -> combined in+out degree.
pub type CentralityMap = NodeMap<usize>;

/// Node id -> separate in and out degree.
pub type DirectedDegreeMap = NodeMap<DirectedDegree>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectedDegree {
    pub in_degree: usize,
    pub out_degree: usize,
}

impl DirectedDegree {
    #[must_use]
    pub fn total(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

/// Computes combined degree for every node, in node-array order.
#[must_use]
pub fn degree_centrality(pathway: &Pathway) -> CentralityMap {
    let mut centrality = CentralityMap::with_capacity(pathway.nodes.len());
    for node in &pathway.nodes {
        centrality.insert_if_absent(&node.id, 0);
    }

    for edge in &pathway.edges {
        if let Some(count) = centrality.get_mut(&edge.source) {
            *count += 1;
        }
        if let Some(count) = centrality.get_mut(&edge.target) {
            *count += 1;
        }
    }

    centrality
}

/// Computes in-degree and out-degree for every node, in node-array order.
#[must_use]
pub fn directed_degrees(pathway: &Pathway) -> DirectedDegreeMap {
    let mut degrees = DirectedDegreeMap::with_capacity(pathway.nodes.len());
    for node in &pathway.nodes {
        degrees.insert_if_absent(&node.id, DirectedDegree::default());
    }

    for edge in &pathway.edges {
        if let Some(d) = degrees.get_mut(&edge.source) {
            d.out_degree += 1;
        }
        if let Some(d) = degrees.get_mut(&edge.target) {
            d.in_degree += 1;
        }
    }

    degrees
}
