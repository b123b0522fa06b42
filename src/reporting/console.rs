use colored::Colorize;
use std::fmt::Write;

use crate::metrics::{MetricBundle, RankingEntry};
use crate::reporting::shared::{pluralize, signed_delta, signed_percent};
use crate::simulation::SimulationResult;

/// Renders a before/after simulation report.
#[must_use]
pub fn render_simulation(result: &SimulationResult, top: usize) -> String {
    let mut out = String::new();
    let a = &result.analysis;
    let s = &a.structural;

    let header = format!(
        "{} of {} in '{}'",
        result.perturbation.kind, result.perturbation.node_id, result.original_graph.name
    );
    let _ = writeln!(out, "{}", header.bold());

    let _ = writeln!(
        out,
        "  nodes: {} -> {}   edges: {} -> {}",
        s.original_node_count, s.perturbed_node_count, s.original_edge_count, s.perturbed_edge_count
    );
    if s.lost_edges > 0 {
        let lost = format!("  lost {} {}", s.lost_edges, pluralize("edge", s.lost_edges));
        let _ = writeln!(out, "{}", lost.red());
    }

    let delta = signed_percent(a.connectivity.delta_percent);
    let delta = if a.connectivity.delta_percent < 0.0 {
        delta.red()
    } else {
        delta.green()
    };
    let _ = writeln!(
        out,
        "  connectivity: {:.2}% -> {:.2}% ({delta})",
        a.connectivity.before, a.connectivity.after
    );
    let _ = writeln!(
        out,
        "  most influential: {} -> {}",
        a.most_influential_node.before, a.most_influential_node.after
    );

    let changed: Vec<String> = a
        .centrality_comparison
        .delta
        .iter()
        .filter(|(_, d)| **d != 0)
        .map(|(id, d)| format!("{id} {}", signed_delta(*d)))
        .collect();
    if !changed.is_empty() {
        let _ = writeln!(out, "  degree changes: {}", changed.join(", "));
    }

    let _ = writeln!(out, "{}", "Regulatory ranking (after)".bold());
    write_ranking(&mut out, &a.regulatory_ranking, top);
    let _ = writeln!(
        out,
        "  high centrality: {}",
        a.high_centrality_nodes.join(", ").cyan()
    );
    out
}

/// Renders the metrics of one pathway state.
#[must_use]
pub fn render_metrics(name: &str, bundle: &MetricBundle, top: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Metrics for '{name}'").bold());
    let _ = writeln!(out, "  nodes: {}", bundle.centrality.len());
    let _ = writeln!(out, "  connectivity: {:.2}%", bundle.connectivity);
    let _ = writeln!(out, "  most influential: {}", bundle.most_influential);
    let _ = writeln!(out, "{}", "Regulatory ranking".bold());
    write_ranking(&mut out, &bundle.ranking, top);
    out
}

fn write_ranking(out: &mut String, ranking: &[RankingEntry], top: usize) {
    if ranking.is_empty() {
        let _ = writeln!(out, "  {}", "(empty pathway)".dimmed());
        return;
    }
    for (i, e) in ranking.iter().take(top).enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<16} score {:>8.3}  degree {:>3} (in {}, out {})  influence {}",
            i + 1,
            e.node_id,
            e.regulatory_score,
            e.degree,
            e.in_degree,
            e.out_degree,
            e.influence_score
        );
    }
    let hidden = ranking.len().saturating_sub(top);
    if hidden > 0 {
        let more = format!("  ... {hidden} more {}", pluralize("node", hidden));
        let _ = writeln!(out, "{}", more.dimmed());
    }
}
