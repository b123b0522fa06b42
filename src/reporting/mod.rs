// src/reporting/mod.rs
//! Terminal rendering of simulation results and metric bundles.

pub mod console;
pub mod shared;

pub use console::{render_metrics, render_simulation};
