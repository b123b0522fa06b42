//! Structural perturbation engine for directed regulatory pathways.
//!
//! Given a pathway and a single-node perturbation (knockout or
//! overexpression), computes degree, directed-degree, connectivity and
//! regulatory-ranking metrics before and after, and reconciles them.

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod graph;
pub mod interpret;
pub mod logging;
pub mod metrics;
pub mod perturb;
pub mod reporting;
pub mod simulation;

pub use error::{Result, SimError};
pub use graph::{Edge, Node, NodeMap, Pathway};
pub use perturb::{knockout, overexpress, Perturbation, PerturbationKind};
pub use simulation::{run_simulation, run_simulation_value, SimulationResult, Simulator};
