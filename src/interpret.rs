// src/interpret.rs
//! Natural-language interpretation of simulation results.
//!
//! The interpreter itself is an external collaborator supplied by the caller.
//! This module builds its request, parses and normalizes its reply, and
//! merges the reply into the serialized result.

use anyhow::{anyhow, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write;
use tracing::warn;

use crate::graph::{Edge, Node};
use crate::metrics::CentralityMap;
use crate::perturb::{Perturbation, PerturbationKind};
use crate::simulation::SimulationResult;

const MAX_PROMPT_NODES: usize = 20;
const MAX_PROMPT_EDGES: usize = 30;
const MAX_TOP_NODES: usize = 5;
const DEFAULT_CONFIDENCE: f64 = 0.7;
const FALLBACK_SUMMARY: &str = "AI analysis failed or unavailable.";

/// A service that turns a simulation digest into JSON text.
pub trait Interpreter {
    /// Returns the raw reply. It should contain a JSON object.
    ///
    /// # Errors
    /// Any failure reaching or using the service.
    fn interpret(&self, request: &InterpretationRequest) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopNode {
    pub id: String,
    pub degree: usize,
    pub influence: f64,
}

/// The digest sent to an interpreter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationRequest {
    pub perturbation: Perturbation,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub centrality: CentralityMap,
    pub top_nodes: Vec<TopNode>,
}

impl InterpretationRequest {
    #[must_use]
    pub fn from_result(result: &SimulationResult) -> Self {
        let graph = &result.perturbed_graph;
        let top_nodes = result
            .analysis
            .regulatory_ranking
            .iter()
            .take(MAX_TOP_NODES)
            .map(|r| TopNode {
                id: r.node_id.clone(),
                degree: r.degree,
                influence: r.influence_score,
            })
            .collect();

        Self {
            perturbation: result.perturbation.clone(),
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            nodes: graph.nodes.iter().take(MAX_PROMPT_NODES).cloned().collect(),
            edges: graph.edges.iter().take(MAX_PROMPT_EDGES).cloned().collect(),
            centrality: result.analysis.degree_centrality.clone(),
            top_nodes,
        }
    }

    /// Renders the instruction text for a language-model backed interpreter.
    #[must_use]
    pub fn prompt(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "You are a computational biologist analyzing perturbed signaling pathways.");
        let _ = writeln!(
            out,
            "Analyze the provided perturbation experiment and return ONLY valid JSON matching this EXACT schema:"
        );
        let _ = writeln!(
            out,
            r#"{{ "summary": "string", "affected_nodes": ["nodeId1", "nodeId2"], "predicted_outcome": "string", "biological_context": "string", "confidence_score": 0.0 }}"#
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Perturbation Type: {}", self.perturbation.kind);
        let _ = writeln!(out, "Target Node: {}", self.perturbation.node_id);
        let _ = writeln!(out, "Pathway Nodes ({}): {}", self.node_count, json(&self.nodes));
        let _ = writeln!(out, "Pathway Edges ({}): {}", self.edge_count, json(&self.edges));
        let _ = writeln!(out, "Post-perturbation Degree Centrality: {}", json(&self.centrality));
        let _ = writeln!(out, "Top Regulatory Nodes: {}", json(&self.top_nodes));
        let _ = writeln!(out);
        let _ = writeln!(out, "Rules:");
        let _ = writeln!(out, "- confidence_score must be a float between 0.0 and 1.0");
        let _ = writeln!(out, "- affected_nodes must be an array of node IDs (strings) from the pathway");
        let _ = write!(out, "- Return ONLY JSON, no markdown, no explanation outside JSON");
        out
    }
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// A normalized interpreter reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub summary: String,
    pub affected_nodes: Vec<Value>,
    pub predicted_outcome: String,
    pub biological_context: String,
    pub confidence_score: f64,
}

impl Interpretation {
    /// Extracts the JSON object from a reply: the whole text, or else the
    /// outermost `{...}` span inside it.
    ///
    /// # Errors
    /// Returns error if no JSON object can be recovered.
    pub fn parse(text: &str) -> Result<Self> {
        let object_span = Regex::new(r"(?s)\{.*\}")?;
        let value = serde_json::from_str::<Value>(text)
            .ok()
            .or_else(|| {
                object_span
                    .find(text)
                    .and_then(|m| serde_json::from_str(m.as_str()).ok())
            })
            .ok_or_else(|| anyhow!("interpreter returned no JSON"))?;
        Self::normalize(&value)
    }

    /// Applies defaults to missing or mistyped fields and clamps confidence.
    ///
    /// # Errors
    /// Returns error if `value` is not a JSON object.
    pub fn normalize(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| anyhow!("interpreter returned invalid JSON structure"))?;
        let text = |key: &str, default: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };

        Ok(Self {
            summary: text("summary", "No summary provided."),
            affected_nodes: obj
                .get("affected_nodes")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            predicted_outcome: text("predicted_outcome", ""),
            biological_context: text("biological_context", ""),
            confidence_score: obj
                .get("confidence_score")
                .and_then(Value::as_f64)
                .map_or(DEFAULT_CONFIDENCE, |c| c.clamp(0.0, 1.0)),
        })
    }

    fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("summary".into(), Value::from(self.summary));
        fields.insert("affected_nodes".into(), Value::from(self.affected_nodes.clone()));
        fields.insert("keyAffectedNodes".into(), Value::from(self.affected_nodes));
        fields.insert("predicted_outcome".into(), Value::from(self.predicted_outcome.clone()));
        fields.insert("predictedBiologicalOutcome".into(), Value::from(self.predicted_outcome));
        fields.insert("biological_context".into(), Value::from(self.biological_context));
        fields.insert("confidence_score".into(), Value::from(self.confidence_score));
        fields
    }
}

fn fallback_fields(err: &anyhow::Error) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("summary".into(), Value::from(FALLBACK_SUMMARY));
    fields.insert("affected_nodes".into(), Value::Array(Vec::new()));
    fields.insert("predicted_outcome".into(), Value::from(""));
    fields.insert("biological_context".into(), Value::from(""));
    fields.insert("aiError".into(), Value::from(format!("{err:#}")));
    fields
}

/// Serializes `result` and merges an interpretation into its `analysis`.
///
/// A failing interpreter never fails the call; fallback fields carrying the
/// error message are merged instead.
///
/// # Errors
/// Returns error only if the result cannot be serialized.
pub fn annotate(
    result: &SimulationResult,
    interpreter: &dyn Interpreter,
) -> crate::error::Result<Value> {
    let request = InterpretationRequest::from_result(result);
    let fields = match interpreter
        .interpret(&request)
        .and_then(|reply| Interpretation::parse(&reply))
    {
        Ok(interpretation) => interpretation.into_fields(),
        Err(e) => {
            warn!(error = %e, "interpretation unavailable");
            fallback_fields(&e)
        }
    };

    let mut value = serde_json::to_value(result)?;
    if let Some(analysis) = value.get_mut("analysis").and_then(Value::as_object_mut) {
        analysis.extend(fields);
    }
    Ok(value)
}

/// Deterministic local interpreter derived from the digest alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineInterpreter;

impl Interpreter for OfflineInterpreter {
    fn interpret(&self, request: &InterpretationRequest) -> Result<String> {
        let target = &request.perturbation.node_id;
        let affected: Vec<&str> = request
            .top_nodes
            .iter()
            .map(|t| t.id.as_str())
            .filter(|id| *id != target.as_str())
            .collect();
        let lead = affected.first().copied().unwrap_or("none");

        let (summary, outcome) = match request.perturbation.kind {
            PerturbationKind::Knockout => (
                format!(
                    "Knockout of {target} leaves {} nodes and {} edges; {lead} now ranks highest.",
                    request.node_count, request.edge_count
                ),
                format!("Signalling routed through {target} is lost; downstream targets lose their input."),
            ),
            PerturbationKind::Overexpression => (
                format!(
                    "Overexpression of {target} raises its regulatory weight across {} nodes and {} edges.",
                    request.node_count, request.edge_count
                ),
                format!("Targets regulated by {target} receive amplified input."),
            ),
        };

        let reply = serde_json::json!({
            "summary": summary,
            "affected_nodes": affected,
            "predicted_outcome": outcome,
            "biological_context": "Derived from structural metrics only.",
            "confidence_score": 0.5,
        });
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Pathway;
    use crate::simulation::run_simulation;

    struct Failing;

    impl Interpreter for Failing {
        fn interpret(&self, _: &InterpretationRequest) -> Result<String> {
            Err(anyhow!("API key is not configured"))
        }
    }

    struct Canned(&'static str);

    impl Interpreter for Canned {
        fn interpret(&self, _: &InterpretationRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn result() -> SimulationResult {
        let p = Pathway::new(
            "chain",
            vec![Node::new("A", ""), Node::new("B", ""), Node::new("C", "")],
            vec![Edge::new("A", "B"), Edge::new("B", "C")],
        );
        run_simulation(&p, "knockout", "B").unwrap()
    }

    #[test]
    fn test_parse_embedded_json() {
        let reply = "Sure! ```json\n{\"summary\": \"ok\", \"confidence_score\": 3}\n```";
        let i = Interpretation::parse(reply).unwrap();
        assert_eq!(i.summary, "ok");
        assert_eq!(i.confidence_score, 1.0);
        assert!(i.affected_nodes.is_empty());
    }

    #[test]
    fn test_parse_defaults() {
        let i = Interpretation::parse(r#"{"summary": 12}"#).unwrap();
        assert_eq!(i.summary, "No summary provided.");
        assert_eq!(i.confidence_score, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(Interpretation::parse("[1, 2]").is_err());
        assert!(Interpretation::parse("no json here").is_err());
    }

    #[test]
    fn test_annotate_merges_fields() {
        let canned = Canned(r#"{"summary": "B is a bottleneck", "affected_nodes": ["C"]}"#);
        let v = annotate(&result(), &canned).unwrap();
        assert_eq!(v["analysis"]["summary"], "B is a bottleneck");
        assert_eq!(v["analysis"]["keyAffectedNodes"][0], "C");
        assert_eq!(v["analysis"]["knockedOutNode"], "B");
    }

    #[test]
    fn test_annotate_falls_back_on_failure() {
        let v = annotate(&result(), &Failing).unwrap();
        assert_eq!(v["analysis"]["summary"], FALLBACK_SUMMARY);
        assert!(v["analysis"]["aiError"]
            .as_str()
            .unwrap()
            .contains("API key"));
        assert_eq!(v["analysis"]["structural"]["lostEdges"], 2);
    }

    #[test]
    fn test_request_limits_and_prompt() {
        let request = InterpretationRequest::from_result(&result());
        assert_eq!(request.node_count, 2);
        assert_eq!(request.edge_count, 0);
        let prompt = request.prompt();
        assert!(prompt.contains("Perturbation Type: knockout"));
        assert!(prompt.contains("Target Node: B"));
    }

    #[test]
    fn test_offline_interpreter_round_trip() {
        let v = annotate(&result(), &OfflineInterpreter).unwrap();
        let summary = v["analysis"]["summary"].as_str().unwrap();
        assert!(summary.starts_with("Knockout of B"));
        assert_eq!(v["analysis"]["confidence_score"], 0.5);
    }
}
