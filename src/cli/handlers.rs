// src/cli/handlers.rs
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::graph::Pathway;
use crate::interpret::{self, OfflineInterpreter};
use crate::metrics::MetricBundle;
use crate::reporting;
use crate::simulation::Simulator;

/// Reads and parses a pathway JSON file.
///
/// # Errors
/// Returns error if the file cannot be read or is not a pathway.
pub fn read_pathway(path: &Path) -> Result<Pathway> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Pathway::from_json_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub struct SimulateRequest<'a> {
    pub file: &'a Path,
    pub kind: &'a str,
    pub node: &'a str,
    pub multiplier: Option<f64>,
    pub interpret: bool,
    pub format: OutputFormat,
}

/// Runs a simulation and renders its output.
///
/// # Errors
/// Returns error on unreadable input or an invalid perturbation request.
pub fn handle_simulate(req: &SimulateRequest<'_>, config: &Config) -> Result<String> {
    let pathway = read_pathway(req.file)?;

    let mut settings = config.simulation.settings();
    if let Some(m) = req.multiplier {
        settings.multiplier = m;
    }
    settings.validate()?;
    let result = Simulator::new(settings).run(&pathway, req.kind, req.node)?;

    match req.format {
        OutputFormat::Json if req.interpret => {
            let value = interpret::annotate(&result, &OfflineInterpreter)?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            let mut out = reporting::render_simulation(&result, config.report.top_ranked);
            if req.interpret {
                let value = interpret::annotate(&result, &OfflineInterpreter)?;
                if let Some(summary) = value["analysis"]["summary"].as_str() {
                    let _ = writeln!(out, "{} {summary}", "interpretation:".cyan().bold());
                }
            }
            Ok(out)
        }
    }
}

/// Computes the metrics of an unperturbed pathway and renders them.
///
/// # Errors
/// Returns error on unreadable input.
pub fn handle_metrics(file: &Path, format: OutputFormat, config: &Config) -> Result<String> {
    let pathway = read_pathway(file)?;
    let bundle = MetricBundle::compute(&pathway);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&bundle)?),
        OutputFormat::Text => Ok(reporting::render_metrics(
            &pathway.name,
            &bundle,
            config.report.top_ranked,
        )),
    }
}
