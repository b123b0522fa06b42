// src/graph/mod.rs
//! Pathway graph values: nodes, edges, and node-keyed metric maps.

pub mod node_map;
pub mod pathway;

pub use node_map::NodeMap;
pub use pathway::{Edge, Node, Pathway};
