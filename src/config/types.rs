use serde::{Deserialize, Serialize};

use crate::perturb::DEFAULT_MULTIPLIER;
use crate::simulation::{SimulationSettings, DEFAULT_HIGH_CENTRALITY_COUNT};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_multiplier")]
    pub overexpression_multiplier: f64,
    #[serde(default = "default_high_centrality_count")]
    pub high_centrality_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            overexpression_multiplier: default_multiplier(),
            high_centrality_count: default_high_centrality_count(),
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            multiplier: self.overexpression_multiplier,
            high_centrality_count: self.high_centrality_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Ranking rows shown in the terminal report.
    #[serde(default = "default_top_ranked")]
    pub top_ranked: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_ranked: default_top_ranked(),
        }
    }
}

fn default_multiplier() -> f64 { DEFAULT_MULTIPLIER }
fn default_high_centrality_count() -> usize { DEFAULT_HIGH_CENTRALITY_COUNT }
fn default_top_ranked() -> usize { 5 }
