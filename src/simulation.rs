// src/simulation.rs
//! Perturbation orchestration.
//!
//! Validates a request, computes metrics on the untouched pathway, applies
//! the perturbation to a copy, recomputes, and reconciles the two states.
//! No state survives between calls.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::compare::{
    centrality_delta, connectivity_delta, high_centrality_nodes, CentralityDelta,
    StructuralSummary,
};
use crate::config::Config;
use crate::error::{Result, SimError};
use crate::graph::Pathway;
use crate::metrics::{CentralityMap, DirectedDegreeMap, MetricBundle, RankingEntry};
use crate::perturb::{Perturbation, PerturbationKind, DEFAULT_MULTIPLIER};

pub const DEFAULT_HIGH_CENTRALITY_COUNT: usize = 3;

/// Tunables for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub multiplier: f64,
    pub high_centrality_count: usize,
}

impl SimulationSettings {
    /// Rejects multipliers that would produce a negative or non-finite
    /// influence score, and an empty high-centrality list.
    ///
    /// # Errors
    /// Returns `InvalidSetting` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if !self.multiplier.is_finite() || self.multiplier < 0.0 {
            return Err(SimError::InvalidSetting {
                key: "overexpression_multiplier",
                reason: format!("must be finite and >= 0, got {}", self.multiplier),
            });
        }
        if self.high_centrality_count == 0 {
            return Err(SimError::InvalidSetting {
                key: "high_centrality_count",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            high_centrality_count: DEFAULT_HIGH_CENTRALITY_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityComparison {
    pub before: CentralityMap,
    pub after: CentralityMap,
    pub delta: CentralityDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectedComparison {
    pub before: DirectedDegreeMap,
    pub after: DirectedDegreeMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityComparison {
    pub before: f64,
    pub after: f64,
    pub delta_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfluenceComparison {
    pub before: String,
    pub after: String,
}

/// Every before/after/delta metric of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// After perturbation.
    pub degree_centrality: CentralityMap,
    pub before_degree_centrality: CentralityMap,
    pub centrality_comparison: CentralityComparison,
    pub directed_degrees: DirectedComparison,
    pub connectivity: ConnectivityComparison,
    /// After perturbation, enriched with directed degrees.
    pub regulatory_ranking: Vec<RankingEntry>,
    pub before_regulatory_ranking: Vec<RankingEntry>,
    pub most_influential_node: InfluenceComparison,
    pub high_centrality_nodes: Vec<String>,
    pub knocked_out_node: Option<String>,
    pub overexpressed_node: Option<String>,
    pub structural: StructuralSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub perturbation: Perturbation,
    pub original_graph: Pathway,
    pub perturbed_graph: Pathway,
    pub analysis: Analysis,
}

/// Runs perturbation simulations with fixed settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulator {
    settings: SimulationSettings,
}

impl Simulator {
    #[must_use]
    pub fn new(settings: SimulationSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.simulation.settings())
    }

    #[must_use]
    pub fn settings(&self) -> SimulationSettings {
        self.settings
    }

    /// Validates the request, then perturbs a copy of `pathway` and compares.
    ///
    /// # Errors
    /// `InvalidSetting` if the settings are out of range, `InvalidInput` for
    /// duplicate node ids, `MissingParameter` for an empty
    /// target or type, `UnsupportedPerturbationType` for any type other than
    /// knockout or overexpression, `NodeNotFound` if the target is absent.
    pub fn run(
        &self,
        pathway: &Pathway,
        perturbation_type: &str,
        target_node_id: &str,
    ) -> Result<SimulationResult> {
        self.settings.validate()?;
        let perturbation = validate(pathway, perturbation_type, target_node_id)?;
        debug!(kind = %perturbation.kind, node = %perturbation.node_id, "request validated");
        Ok(self.execute(pathway, perturbation))
    }

    /// Like [`Simulator::run`], for an untyped payload.
    ///
    /// # Errors
    /// `InvalidInput` if the payload is not a pathway, otherwise as `run`.
    pub fn run_value(
        &self,
        payload: &Value,
        perturbation_type: &str,
        target_node_id: &str,
    ) -> Result<SimulationResult> {
        let pathway = Pathway::from_value(payload)?;
        self.run(&pathway, perturbation_type, target_node_id)
    }

    fn execute(&self, original: &Pathway, perturbation: Perturbation) -> SimulationResult {
        let before = MetricBundle::compute(original);
        debug!(
            nodes = original.nodes.len(),
            edges = original.edges.len(),
            connectivity = before.connectivity,
            "computed baseline metrics"
        );

        let perturbed = perturbation.apply(original, self.settings.multiplier);
        debug!(
            nodes = perturbed.nodes.len(),
            edges = perturbed.edges.len(),
            "applied perturbation"
        );

        let after = MetricBundle::compute(&perturbed);
        debug!(connectivity = after.connectivity, "computed perturbed metrics");

        let analysis = reconcile(
            original,
            &perturbed,
            &perturbation,
            before,
            after,
            &self.settings,
        );
        info!(
            kind = %perturbation.kind,
            node = %perturbation.node_id,
            lost_edges = analysis.structural.lost_edges,
            connectivity_delta = analysis.connectivity.delta_percent,
            "simulation complete"
        );

        SimulationResult {
            perturbation,
            original_graph: original.clone(),
            perturbed_graph: perturbed,
            analysis,
        }
    }
}

/// Runs a simulation with default settings (multiplier 2, top 3).
///
/// # Errors
/// See [`Simulator::run`].
pub fn run_simulation(
    pathway: &Pathway,
    perturbation_type: &str,
    target_node_id: &str,
) -> Result<SimulationResult> {
    Simulator::default().run(pathway, perturbation_type, target_node_id)
}

/// Runs a simulation with default settings on an untyped payload.
///
/// # Errors
/// See [`Simulator::run_value`].
pub fn run_simulation_value(
    payload: &Value,
    perturbation_type: &str,
    target_node_id: &str,
) -> Result<SimulationResult> {
    Simulator::default().run_value(payload, perturbation_type, target_node_id)
}

/// Checks run in order: shape, target id, type, node existence.
fn validate(
    pathway: &Pathway,
    perturbation_type: &str,
    target_node_id: &str,
) -> Result<Perturbation> {
    if let Some(dup) = pathway.duplicate_node_id() {
        return Err(SimError::InvalidInput(format!("duplicate node id detected: {dup}")));
    }
    if target_node_id.is_empty() {
        return Err(SimError::MissingParameter("targetNodeId"));
    }
    if perturbation_type.is_empty() {
        return Err(SimError::MissingParameter("perturbationType"));
    }
    let kind: PerturbationKind = perturbation_type.parse()?;
    if !pathway.contains_node(target_node_id) {
        return Err(SimError::NodeNotFound(target_node_id.to_string()));
    }
    Ok(Perturbation::new(kind, target_node_id))
}

fn reconcile(
    original: &Pathway,
    perturbed: &Pathway,
    perturbation: &Perturbation,
    before: MetricBundle,
    after: MetricBundle,
    settings: &SimulationSettings,
) -> Analysis {
    let delta = centrality_delta(&before.centrality, &after.centrality);
    let delta_percent = connectivity_delta(before.connectivity, after.connectivity);
    let high = high_centrality_nodes(&after.ranking, settings.high_centrality_count);
    let structural = StructuralSummary::compute(original, perturbed, perturbation);

    let target = Some(perturbation.node_id.clone());
    let (knocked_out_node, overexpressed_node) = match perturbation.kind {
        PerturbationKind::Knockout => (target, None),
        PerturbationKind::Overexpression => (None, target),
    };

    Analysis {
        degree_centrality: after.centrality.clone(),
        before_degree_centrality: before.centrality.clone(),
        centrality_comparison: CentralityComparison {
            before: before.centrality,
            after: after.centrality,
            delta,
        },
        directed_degrees: DirectedComparison {
            before: before.directed,
            after: after.directed,
        },
        connectivity: ConnectivityComparison {
            before: before.connectivity,
            after: after.connectivity,
            delta_percent,
        },
        regulatory_ranking: after.ranking,
        before_regulatory_ranking: before.ranking,
        most_influential_node: InfluenceComparison {
            before: before.most_influential,
            after: after.most_influential,
        },
        high_centrality_nodes: high,
        knocked_out_node,
        overexpressed_node,
        structural,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn chain() -> Pathway {
        Pathway::new(
            "chain",
            vec![
                Node::new("A", "a"),
                Node::new("B", "b"),
                Node::new("C", "c"),
                Node::new("D", "d"),
            ],
            vec![
                Edge::new("A", "B").with_kind("activation"),
                Edge::new("B", "C").with_kind("activation"),
                Edge::new("C", "D").with_kind("activation"),
            ],
        )
    }

    #[test]
    fn test_validation_order() {
        let mut dup = chain();
        dup.nodes.push(Node::new("A", "again"));
        assert!(matches!(run_simulation(&dup, "mutate", ""), Err(SimError::InvalidInput(_))));

        let p = chain();
        assert!(matches!(
            run_simulation(&p, "mutate", ""),
            Err(SimError::MissingParameter("targetNodeId"))
        ));
        assert!(matches!(
            run_simulation(&p, "", "A"),
            Err(SimError::MissingParameter("perturbationType"))
        ));
        assert!(matches!(
            run_simulation(&p, "mutate", "ZZZ"),
            Err(SimError::UnsupportedPerturbationType(_))
        ));
        assert!(matches!(
            run_simulation(&p, "knockout", "ZZZ"),
            Err(SimError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_marker_fields() {
        let p = chain();
        let ko = run_simulation(&p, "knockout", "B").unwrap();
        assert_eq!(ko.analysis.knocked_out_node.as_deref(), Some("B"));
        assert_eq!(ko.analysis.overexpressed_node, None);

        let over = run_simulation(&p, "overexpression", "B").unwrap();
        assert_eq!(over.analysis.knocked_out_node, None);
        assert_eq!(over.analysis.overexpressed_node.as_deref(), Some("B"));
        assert_eq!(over.analysis.structural.lost_edges, 0);
    }

    #[test]
    fn test_rejects_out_of_range_settings() {
        let p = chain();
        for multiplier in [-3.0, f64::INFINITY, f64::NAN] {
            let sim = Simulator::new(SimulationSettings {
                multiplier,
                ..SimulationSettings::default()
            });
            assert!(matches!(
                sim.run(&p, "overexpression", "C"),
                Err(SimError::InvalidSetting { key: "overexpression_multiplier", .. })
            ));
        }

        let sim = Simulator::new(SimulationSettings {
            high_centrality_count: 0,
            ..SimulationSettings::default()
        });
        assert!(matches!(
            sim.run(&p, "knockout", "B"),
            Err(SimError::InvalidSetting { key: "high_centrality_count", .. })
        ));
    }

    #[test]
    fn test_zero_multiplier_is_allowed() {
        let sim = Simulator::new(SimulationSettings {
            multiplier: 0.0,
            ..SimulationSettings::default()
        });
        let result = sim.run(&chain(), "overexpression", "C").unwrap();
        assert_eq!(result.perturbed_graph.influence_of("C"), 0.0);
    }

    #[test]
    fn test_custom_settings() {
        let sim = Simulator::new(SimulationSettings {
            multiplier: 3.0,
            high_centrality_count: 1,
        });
        let result = sim.run(&chain(), "overexpression", "C").unwrap();
        assert_eq!(result.perturbed_graph.influence_of("C"), 3.0);
        assert_eq!(result.analysis.high_centrality_nodes, vec!["C"]);
    }
}
