// tests/cli_simulate.rs
//! Command handlers driven with fixture files.

use pathsim_core::cli::handlers::SimulateRequest;
use pathsim_core::cli::{handle_metrics, handle_simulate, OutputFormat};
use pathsim_core::config::Config;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/chain.json")
}

fn request<'a>(file: &'a Path, kind: &'a str, node: &'a str) -> SimulateRequest<'a> {
    SimulateRequest {
        file,
        kind,
        node,
        multiplier: None,
        interpret: false,
        format: OutputFormat::Json,
    }
}

#[test]
fn test_simulate_json_output() {
    let file = fixture();
    let out = handle_simulate(&request(&file, "knockout", "B"), &Config::new()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["analysis"]["connectivity"]["after"], 16.67);
    assert_eq!(v["perturbedGraph"]["name"], "MAPK chain");
}

#[test]
fn test_simulate_multiplier_override() {
    let file = fixture();
    let mut req = request(&file, "overexpression", "C");
    req.multiplier = Some(5.0);
    let out = handle_simulate(&req, &Config::new()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["perturbedGraph"]["nodes"][2]["influenceScore"], 5.0);
}

#[test]
fn test_simulate_with_interpretation() {
    let file = fixture();
    let mut req = request(&file, "knockout", "C");
    req.interpret = true;
    let out = handle_simulate(&req, &Config::new()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(v["analysis"]["summary"].as_str().unwrap().contains("Knockout of C"));
}

#[test]
fn test_simulate_text_output() {
    colored::control::set_override(false);
    let file = fixture();
    let mut req = request(&file, "knockout", "B");
    req.format = OutputFormat::Text;
    let out = handle_simulate(&req, &Config::new()).unwrap();
    assert!(out.contains("knockout of B in 'MAPK chain'"));
    assert!(out.contains("lost 2 edges"));
}

#[test]
fn test_simulate_rejects_unknown_node() {
    let file = fixture();
    let err = handle_simulate(&request(&file, "knockout", "ZZZ"), &Config::new()).unwrap_err();
    assert!(err.to_string().contains("ZZZ"));
}

#[test]
fn test_malformed_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("bad.json");
    fs::write(&path, r#"{"name": "bad", "nodes": {}, "edges": []}"#).unwrap();
    let err = handle_metrics(&path, OutputFormat::Json, &Config::new()).unwrap_err();
    assert!(format!("{err:#}").contains("nodes must be an array"));
}

#[test]
fn test_metrics_json() {
    let out = handle_metrics(&fixture(), OutputFormat::Json, &Config::new()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["connectivity"], 25.0);
    assert_eq!(v["mostInfluential"], "B");
    assert_eq!(v["centrality"]["C"], 2);
}

#[test]
fn test_simulate_rejects_negative_multiplier() {
    let file = fixture();
    let mut req = request(&file, "overexpression", "C");
    req.multiplier = Some(-1.0);
    let err = handle_simulate(&req, &Config::new()).unwrap_err();
    assert!(err.to_string().contains("overexpression_multiplier"));
}
