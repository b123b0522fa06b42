// src/graph/pathway.rs
//! The pathway record types and their read-time defaulting rules.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{Result, SimError};

/// A named species in the pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Raw score as supplied. Read it through [`Node::influence`].
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub influence_score: Option<f64>,
}

impl Node {
    pub const DEFAULT_INFLUENCE: f64 = 1.0;

    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            influence_score: None,
        }
    }

    #[must_use]
    pub fn with_influence(mut self, score: f64) -> Self {
        self.influence_score = Some(score);
        self
    }

    /// Influence score, 1.0 when absent.
    #[must_use]
    pub fn influence(&self) -> f64 {
        self.influence_score.unwrap_or(Self::DEFAULT_INFLUENCE)
    }
}

/// A directed regulatory interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Raw interaction tag as supplied. Read it through [`Edge::kind`].
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Edge {
    pub const ACTIVATION: &'static str = "activation";
    pub const INHIBITION: &'static str = "inhibition";

    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Interaction tag, "activation" when absent.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(Self::ACTIVATION)
    }

    /// True if either endpoint is `node_id`.
    #[must_use]
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A directed labeled graph. Node order is significant for ranking tie-breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    #[serde(default)]
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Pathway {
    #[must_use]
    pub fn new(name: impl Into<String>, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            name: name.into(),
            nodes,
            edges,
        }
    }

    /// Parses an untyped payload.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the payload is not an object, if `nodes` or
    /// `edges` is not an array, or if a node or edge record is malformed.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            return Err(SimError::InvalidInput("payload must be an object".into()));
        };
        if !obj.get("nodes").is_some_and(Value::is_array) {
            return Err(SimError::InvalidInput("nodes must be an array".into()));
        }
        if !obj.get("edges").is_some_and(Value::is_array) {
            return Err(SimError::InvalidInput("edges must be an array".into()));
        }
        Self::deserialize(value).map_err(|e| SimError::InvalidInput(e.to_string()))
    }

    /// Parses a JSON document. See [`Pathway::from_value`].
    ///
    /// # Errors
    /// Returns `Json` if the text is not JSON, otherwise as `from_value`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Influence of `id`, 1.0 if the node is absent or carries no score.
    #[must_use]
    pub fn influence_of(&self, id: &str) -> f64 {
        self.node(id).map_or(Node::DEFAULT_INFLUENCE, Node::influence)
    }

    /// Number of edges with `id` as source or target.
    #[must_use]
    pub fn incident_edge_count(&self, id: &str) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    /// First node id that appears more than once.
    #[must_use]
    pub fn duplicate_node_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.nodes
            .iter()
            .map(|n| n.id.as_str())
            .find(|id| !seen.insert(*id))
    }
}

fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_influence_defaults() {
        let value = json!({
            "nodes": [
                {"id": "A", "label": "a"},
                {"id": "B", "label": "b", "influenceScore": "high"},
                {"id": "C", "label": "c", "influenceScore": null},
                {"id": "D", "label": "d", "influenceScore": 2.5}
            ],
            "edges": []
        });
        let p = Pathway::from_value(&value).unwrap();
        assert_eq!(p.influence_of("A"), 1.0);
        assert_eq!(p.influence_of("B"), 1.0);
        assert_eq!(p.influence_of("C"), 1.0);
        assert_eq!(p.influence_of("D"), 2.5);
        assert_eq!(p.influence_of("missing"), 1.0);
    }

    #[test]
    fn test_edge_kind_default() {
        let e = Edge::new("A", "B");
        assert_eq!(e.kind(), "activation");
        assert_eq!(e.with_kind("inhibition").kind(), "inhibition");
    }

    #[test]
    fn test_from_value_rejects_non_arrays() {
        let bad = json!({"name": "x", "nodes": {}, "edges": []});
        assert!(matches!(Pathway::from_value(&bad), Err(SimError::InvalidInput(_))));

        let bad = json!({"name": "x", "nodes": []});
        assert!(matches!(Pathway::from_value(&bad), Err(SimError::InvalidInput(_))));

        let bad = json!([1, 2, 3]);
        assert!(matches!(Pathway::from_value(&bad), Err(SimError::InvalidInput(_))));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Pathway::new(
            "p",
            vec![Node::new("A", "a").with_influence(1.0)],
            vec![Edge::new("A", "A")],
        );
        let mut copy = original.clone();
        copy.nodes[0].influence_score = Some(9.0);
        copy.edges[0].target = "Z".into();
        assert_eq!(original.nodes[0].influence_score, Some(1.0));
        assert_eq!(original.edges[0].target, "A");
    }

    #[test]
    fn test_duplicate_node_id() {
        let p = Pathway::new(
            "p",
            vec![Node::new("A", ""), Node::new("B", ""), Node::new("A", "")],
            vec![],
        );
        assert_eq!(p.duplicate_node_id(), Some("A"));
    }

    #[test]
    fn test_serialization_omits_absent_defaults() {
        let p = Pathway::new("p", vec![Node::new("A", "a")], vec![Edge::new("A", "A")]);
        let v = serde_json::to_value(&p).unwrap();
        assert!(v["nodes"][0].get("influenceScore").is_none());
        assert!(v["edges"][0].get("type").is_none());
    }
}
