// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stress harness - randomized operator sequences checked against the
//! topological invariants

mod config;
mod report;
mod runner;

pub use config::{OperatorWeights, StressConfig, CONFIG_FILE};
pub use report::{Operation, StressReport, Violation};
pub use runner::StressRunner;
