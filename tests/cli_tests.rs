//! Integration tests for the trailheat CLI
//!
//! These tests run the trailheat binary against small graph files.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Two villages (0 and 5) joined by a road 0 - 1 - 2 - 3 - 4 - 5, a spur
/// 2 - 6 and a detached hut 7
const FOREST: &str = "\
8
13
48.00 7.80 village-a
48.01 7.81
48.02 7.82
48.03 7.83
48.04 7.84
48.05 7.85 village-b
48.02 7.90 spur
49.00 8.00 hut
0 1 60
1 0 60
1 2 60
2 1 60
2 3 60
3 2 60
3 4 60
4 3 60
4 5 60
5 4 60
2 6 30
6 2 30
7 7 5
";

/// Get a Command for trailheat
fn trailheat() -> Command {
    cargo_bin_cmd!("trailheat")
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn forest() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let graph = write(dir.path(), "forest.graph", FOREST);
    (dir, graph)
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    trailheat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: trailheat"))
        .stdout(predicate::str::contains("shortest-paths"))
        .stdout(predicate::str::contains("edge-weights"))
        .stdout(predicate::str::contains("walkways"));
}

#[test]
fn test_version_flag() {
    trailheat()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trailheat"));
}

#[test]
fn test_no_subcommand_prints_banner() {
    trailheat()
        .assert()
        .success()
        .stdout(predicate::str::contains("trailheat --help"));
}

// ============================================================================
// stats / shortest-paths
// ============================================================================

#[test]
fn test_stats_human() {
    let (_dir, graph) = forest();
    trailheat()
        .arg("stats")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes:             8"))
        .stdout(predicate::str::contains("components:        2"))
        .stdout(predicate::str::contains("largest component: 7"));
}

#[test]
fn test_stats_json() {
    let (_dir, graph) = forest();
    let output = trailheat()
        .args(["--format", "json", "stats"])
        .arg(&graph)
        .args(["--min-size", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["nodes"], 8);
    assert_eq!(json["arcs"], 13);
    assert_eq!(json["small_components"], 1);
    assert_eq!(json["largest_component"], 7);
}

#[test]
fn test_shortest_paths_with_limit() {
    let (_dir, graph) = forest();
    trailheat()
        .arg("shortest-paths")
        .arg(&graph)
        .args(["--from", "0", "--limit", "130"])
        .assert()
        .success()
        .stdout("0\t0\n1\t60\n2\t120\n");
}

#[test]
fn test_unknown_start_is_data_error() {
    let (_dir, graph) = forest();
    trailheat()
        .arg("shortest-paths")
        .arg(&graph)
        .args(["--from", "42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error: unknown node: 42"));
}

#[test]
fn test_json_error_envelope() {
    let (_dir, graph) = forest();
    trailheat()
        .args(["--format", "json", "shortest-paths"])
        .arg(&graph)
        .args(["--from", "42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"unknown_node\""));
}

#[test]
fn test_negative_limit_is_usage_error() {
    let (_dir, graph) = forest();
    trailheat()
        .arg("shortest-paths")
        .arg(&graph)
        .args(["--from", "0", "--limit=-5"])
        .assert()
        .code(2);

    trailheat()
        .args(["--format", "json", "shortest-paths"])
        .arg(&graph)
        .args(["--from", "0", "--limit=-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));
}

#[test]
fn test_unknown_argument_json_envelope() {
    trailheat()
        .args(["stats", "--format=json", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));
}

#[test]
fn test_malformed_graph_is_data_error() {
    let dir = tempdir().unwrap();
    let graph = write(dir.path(), "bad.graph", "2\n1\n0 0\n0 0\n0 5 1\n");
    trailheat()
        .arg("stats")
        .arg(&graph)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("line 5"));
}

#[test]
fn test_missing_graph_file_is_failure() {
    let dir = tempdir().unwrap();
    trailheat()
        .arg("stats")
        .arg(dir.path().join("absent.graph"))
        .assert()
        .code(1);
}

// ============================================================================
// contract
// ============================================================================

#[test]
fn test_contract_binary_writes_graph_and_record() {
    let (dir, graph) = forest();
    let output = dir.path().join("contracted.graph");
    let record = dir.path().join("record.json");
    trailheat()
        .arg("contract")
        .arg(&graph)
        .arg("--output")
        .arg(&output)
        .arg("--record")
        .arg(&record)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "binary contraction: 8 -> 5 nodes, 13 -> 7 arcs (3 contracted)",
        ));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("8\n7\n"));
    assert!(written.contains("0 2 120\n"));

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&record).unwrap()).unwrap();
    assert_eq!(record["events"][0]["via"], 1);
    assert_eq!(record["events"].as_array().map(Vec::len), Some(6));
}

#[test]
fn test_contract_respects_exclude_list() {
    let (dir, graph) = forest();
    let exclude = write(dir.path(), "keep.txt", "# keep the middle\n3\n");
    trailheat()
        .arg("contract")
        .arg(&graph)
        .arg("--output")
        .arg(dir.path().join("out.graph"))
        .arg("--exclude")
        .arg(&exclude)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contracted\": 2"));
}

#[test]
fn test_contract_cluster_mode() {
    let (dir, graph) = forest();
    trailheat()
        .arg("contract")
        .arg(&graph)
        .arg("--output")
        .arg(dir.path().join("out.graph"))
        .args(["--mode", "cluster"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cluster contraction"));
}

// ============================================================================
// reachability / edge-weights / walkways
// ============================================================================

#[test]
fn test_reachability_population_per_source() {
    let (dir, graph) = forest();
    let sources = write(dir.path(), "villages.txt", "0\n5\n");
    let targets = write(dir.path(), "cells.txt", "1 10\n2 10\n3 10\n4 10\n6 5\n");
    trailheat()
        .arg("reachability")
        .arg(&graph)
        .arg("--sources")
        .arg(&sources)
        .arg("--targets")
        .arg(&targets)
        .args(["--limit", "150"])
        .assert()
        .success()
        .stdout("0\t25\n5\t20\n");
}

#[test]
fn test_edge_weights_with_contraction() {
    let (dir, graph) = forest();
    let entries = write(dir.path(), "entries.txt", "0 120\n5 80\n");
    let output = dir.path().join("weights.txt");
    trailheat()
        .arg("edge-weights")
        .arg(&graph)
        .arg("--entries")
        .arg(&entries)
        .args(["--limit", "600", "--contract"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let weights = fs::read_to_string(&output).unwrap();
    assert!(weights.contains("0 1 60\n"));
    assert!(weights.contains("4 5 60\n"));
    assert!(weights.contains("5 4 40\n"));
    assert!(weights.contains("2 6 0\n"));
}

#[test]
fn test_edge_weights_json() {
    let (dir, graph) = forest();
    let entries = write(dir.path(), "entries.txt", "0 120\n5 80\n42\n");
    let output = trailheat()
        .args(["--format", "json", "edge-weights"])
        .arg(&graph)
        .arg("--entries")
        .arg(&entries)
        .args(["--limit", "600"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["entries_without_trips"], serde_json::json!([42]));
    assert!(!json["arcs"].as_array().unwrap().is_empty());
}

#[test]
fn test_walkways_human() {
    let (_dir, graph) = forest();
    trailheat()
        .arg("walkways")
        .arg(&graph)
        .args(["--start", "0", "--limit", "180"])
        .assert()
        .success()
        .stdout("0 1 2 3\n0 1 2 6\n");
}

#[test]
fn test_walkways_to_targets_json() {
    let (dir, graph) = forest();
    let targets = write(dir.path(), "targets.txt", "6\n");
    let output = trailheat()
        .args(["--format", "json", "walkways"])
        .arg(&graph)
        .args(["--start", "0", "--limit", "180"])
        .arg("--targets")
        .arg(&targets)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, serde_json::json!([[0, 1, 2, 6]]));
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_config_sets_walkway_limit() {
    let (dir, graph) = forest();
    let config = write(dir.path(), "trailheat.toml", "[walkways]\ncost_limit = 120.0\n");
    trailheat()
        .arg("--config")
        .arg(&config)
        .arg("walkways")
        .arg(&graph)
        .args(["--start", "0"])
        .assert()
        .success()
        .stdout("0 1 2\n");
}

#[test]
fn test_invalid_config_is_usage_error() {
    let (dir, graph) = forest();
    let config = write(
        dir.path(),
        "trailheat.toml",
        "[reachability]\ncost_limit = -1.0\n",
    );
    trailheat()
        .arg("--config")
        .arg(&config)
        .arg("stats")
        .arg(&graph)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("reachability.cost_limit"));
}

#[test]
fn test_quiet_suppresses_human_output() {
    let (_dir, graph) = forest();
    trailheat()
        .args(["--quiet", "stats"])
        .arg(&graph)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_empty_entry_list_is_usage_error() {
    let (dir, graph) = forest();
    let entries = write(dir.path(), "entries.txt", "# nobody\n");
    trailheat()
        .arg("edge-weights")
        .arg(&graph)
        .arg("--entries")
        .arg(&entries)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no entries in"));
}
