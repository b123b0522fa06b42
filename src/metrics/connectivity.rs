// src/metrics/connectivity.rs
//! Connectivity ratio: edges as a percentage of N*(N-1).

use super::round_to;
use crate::graph::Pathway;

/// Returns observed edges as a percentage of the maximum loop-free directed
/// edge count, rounded to two decimals. Zero for graphs with at most one node.
///
/// Not clamped: self-loops or parallel edges can push the result past 100.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn connectivity_ratio(pathway: &Pathway) -> f64 {
    let n = pathway.nodes.len();
    if n <= 1 {
        return 0.0;
    }
    let max_edges = (n * (n - 1)) as f64;
    let actual = pathway.edges.len() as f64;
    round_to(actual / max_edges * 100.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id, *id)).collect()
    }

    #[test]
    fn test_trivial_graphs_are_zero() {
        assert_eq!(connectivity_ratio(&Pathway::default()), 0.0);
        let single = Pathway::new("s", nodes(&["A"]), vec![Edge::new("A", "A")]);
        assert_eq!(connectivity_ratio(&single), 0.0);
    }

    #[test]
    fn test_chain_ratio() {
        let p = Pathway::new(
            "chain",
            nodes(&["A", "B", "C", "D"]),
            vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("C", "D")],
        );
        assert_eq!(connectivity_ratio(&p), 25.0);
    }

    #[test]
    fn test_can_exceed_hundred() {
        let p = Pathway::new(
            "dense",
            nodes(&["A", "B"]),
            vec![
                Edge::new("A", "B"),
                Edge::new("B", "A"),
                Edge::new("A", "A"),
            ],
        );
        assert_eq!(connectivity_ratio(&p), 150.0);
    }
}
