// src/perturb.rs
//! Single-node perturbation operators.
//!
//! Operators never touch their input; each returns a fresh pathway. They do
//! not check that the target exists: an absent id yields an unchanged copy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;
use crate::graph::Pathway;
use crate::metrics::round_to;

pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerturbationKind {
    Knockout,
    Overexpression,
}

impl PerturbationKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knockout => "knockout",
            Self::Overexpression => "overexpression",
        }
    }
}

impl fmt::Display for PerturbationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerturbationKind {
    type Err = SimError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "knockout" => Ok(Self::Knockout),
            "overexpression" => Ok(Self::Overexpression),
            other => Err(SimError::UnsupportedPerturbationType(other.to_string())),
        }
    }
}

/// A validated perturbation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Perturbation {
    #[serde(rename = "type")]
    pub kind: PerturbationKind,
    pub node_id: String,
}

impl Perturbation {
    #[must_use]
    pub fn new(kind: PerturbationKind, node_id: impl Into<String>) -> Self {
        Self {
            kind,
            node_id: node_id.into(),
        }
    }

    /// Applies the perturbation to a copy of `pathway`.
    #[must_use]
    pub fn apply(&self, pathway: &Pathway, multiplier: f64) -> Pathway {
        match self.kind {
            PerturbationKind::Knockout => knockout(pathway, &self.node_id),
            PerturbationKind::Overexpression => overexpress(pathway, &self.node_id, multiplier),
        }
    }
}

/// Removes `node_id` and every edge incident to it.
#[must_use]
pub fn knockout(pathway: &Pathway, node_id: &str) -> Pathway {
    let mut next = pathway.clone();
    next.nodes.retain(|n| n.id != node_id);
    next.edges.retain(|e| !e.touches(node_id));
    next
}

/// Scales the influence score of `node_id` by `multiplier`, rounded to four
/// decimals. A node without a score scales from 1.0.
#[must_use]
pub fn overexpress(pathway: &Pathway, node_id: &str, multiplier: f64) -> Pathway {
    let mut next = pathway.clone();
    for node in next.nodes.iter_mut().filter(|n| n.id == node_id) {
        node.influence_score = Some(round_to(node.influence() * multiplier, 4));
    }
    next
}
