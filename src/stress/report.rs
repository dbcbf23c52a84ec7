// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stress run results

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Topology operator drawn by the stress runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    MakeEdge,
    Splice,
    Connect,
    DeleteEdge,
    AddEdgeVertex,
    SplitEdge,
}

impl Operation {
    /// All operators, in the order of [`OperatorWeights::as_array`](super::OperatorWeights::as_array)
    pub const ALL: [Operation; 6] = [
        Operation::MakeEdge,
        Operation::Splice,
        Operation::Connect,
        Operation::DeleteEdge,
        Operation::AddEdgeVertex,
        Operation::SplitEdge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::MakeEdge => "make_edge",
            Operation::Splice => "splice",
            Operation::Connect => "connect",
            Operation::DeleteEdge => "delete_edge",
            Operation::AddEdgeVertex => "add_edge_vertex",
            Operation::SplitEdge => "split_edge",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A broken invariant observed during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Zero-based operation index within the run
    pub step: usize,
    /// Operator applied at that step
    pub operation: Operation,
    pub message: String,
}

/// Outcome of one seeded stress run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StressReport {
    pub seed: u64,
    /// Applied operators per kind
    pub operations: BTreeMap<Operation, usize>,
    /// Draws rejected because no planar operand pair was found
    pub skipped: usize,
    /// Number of full validations performed
    pub validations: usize,
    pub final_edges: usize,
    pub final_vertices: usize,
    pub final_faces: usize,
    pub final_components: usize,
    pub euler_characteristic: i64,
    pub violations: Vec<Violation>,
    /// Wall-clock time of the run in milliseconds
    pub duration_ms: f64,
}

impl StressReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Whether the run finished without violations
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn total_operations(&self) -> usize {
        self.operations.values().sum()
    }

    pub(crate) fn record(&mut self, operation: Operation) {
        *self.operations.entry(operation).or_insert(0) += 1;
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize stress report")
    }
}
