// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Randomized operator sequences through the public stress API

use planar_dcel::stress::{Operation, OperatorWeights, StressConfig, StressReport, StressRunner};
use tempfile::TempDir;

fn config(operations: usize) -> StressConfig {
    StressConfig {
        iterations: 4,
        operations_per_run: operations,
        seed: 2024,
        max_edges: 64,
        ..StressConfig::default()
    }
}

fn assert_passed(report: &StressReport) {
    assert!(
        report.passed(),
        "seed {} failed: {:?}",
        report.seed,
        report.violations
    );
    assert_eq!(
        report.euler_characteristic,
        2 * report.final_components as i64
    );
}

#[test]
fn test_default_mix_keeps_invariants() {
    let runner = StressRunner::new(config(1_000)).unwrap();
    let reports = runner.run_many();

    assert_eq!(reports.len(), 4);
    for report in &reports {
        assert_passed(report);
        assert!(report.operations.len() > 1);
    }
}

#[test]
fn test_edge_vertex_operators_only() {
    let weights = OperatorWeights {
        make_edge: 1,
        splice: 0,
        connect: 0,
        delete_edge: 1,
        add_edge_vertex: 3,
        split_edge: 3,
    };
    let runner = StressRunner::new(StressConfig {
        weights,
        ..config(600)
    })
    .unwrap();
    let report = runner.run();

    assert_passed(&report);
    assert!(!report.operations.contains_key(&Operation::Splice));
    assert!(!report.operations.contains_key(&Operation::Connect));
    // Trees only: one face per component
    assert_eq!(report.final_faces, report.final_components);
}

#[test]
fn test_splice_heavy_mix() {
    let weights = OperatorWeights {
        make_edge: 3,
        splice: 6,
        connect: 1,
        delete_edge: 2,
        add_edge_vertex: 0,
        split_edge: 0,
    };
    let runner = StressRunner::new(StressConfig {
        weights,
        ..config(800)
    })
    .unwrap();

    for report in runner.run_many() {
        assert_passed(&report);
    }
}

#[test]
fn test_edge_cap_forces_deletions() {
    let runner = StressRunner::new(StressConfig {
        max_edges: 4,
        ..config(200)
    })
    .unwrap();
    let report = runner.run();

    assert_passed(&report);
    assert!(report.final_edges <= 4);
    assert!(report.operations.get(&Operation::DeleteEdge).copied().unwrap_or(0) > 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = StressRunner::new(StressConfig {
        validate_every: 0,
        ..StressConfig::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stress.toml");

    let mut original = config(123);
    original.weights.split_edge = 9;
    original.save(&path).unwrap();

    let loaded = StressConfig::from_file(&path).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_missing_config_file_errors() {
    let dir = TempDir::new().unwrap();
    let err = StressConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_report_json_round_trip() {
    let report = StressRunner::new(config(50)).unwrap().run();
    let json = report.to_json().unwrap();
    let parsed: StressReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.seed, report.seed);
    assert_eq!(parsed.operations, report.operations);
    assert_eq!(parsed.final_edges, report.final_edges);
}
