// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Seeded random operator sequences with invariant checking
//!
//! Operands are drawn so that every applied operator keeps each connected
//! component a planar (genus 0) subdivision: `connect` either splits a face
//! or bridges two components, and a `splice` inside one component is always
//! applied twice so the intermediate state is never observed. With that,
//! `V - E + F == 2 * components` must hold after every step.

use super::config::StressConfig;
use super::report::{Operation, StressReport, Violation};
use crate::topology::{Dcel, HalfEdgeId};
use anyhow::{Context, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

enum Outcome {
    Applied,
    Skipped,
    Broken(String),
}

/// Stress runner
pub struct StressRunner {
    config: StressConfig,
    sampler: WeightedIndex<u32>,
}

impl StressRunner {
    pub fn new(config: StressConfig) -> Result<Self> {
        config.validate()?;
        let sampler =
            WeightedIndex::new(config.weights.as_array()).context("Invalid operator weights")?;
        Ok(Self { config, sampler })
    }

    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    /// Run once with the configured seed
    pub fn run(&self) -> StressReport {
        self.run_seed(self.config.seed)
    }

    pub fn run_seed(&self, seed: u64) -> StressReport {
        self.run_seed_with(seed, |_| {})
    }

    /// Run `iterations` independent seeds in parallel
    pub fn run_many(&self) -> Vec<StressReport> {
        (0..self.config.iterations as u64)
            .into_par_iter()
            .map(|i| self.run_seed(self.config.seed.wrapping_add(i)))
            .collect()
    }

    /// Run one seed, calling `on_step` after every operation
    pub fn run_seed_with(&self, seed: u64, mut on_step: impl FnMut(usize)) -> StressReport {
        self.drive(seed, |step, _, _| on_step(step))
    }

    /// Core loop. `after_step` sees each step's operator and the mesh after
    /// any in-loop validation of that step.
    fn drive(
        &self,
        seed: u64,
        mut after_step: impl FnMut(usize, Operation, &mut Dcel),
    ) -> StressReport {
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut dcel = Dcel::new();
        let mut report = StressReport::new(seed);
        debug!(seed, operations = self.config.operations_per_run, "stress run started");

        let mut pending = None;
        for step in 0..self.config.operations_per_run {
            let operation = self.draw(&dcel, &mut rng);
            match self.apply(&mut dcel, operation, &mut rng) {
                Outcome::Applied => report.record(operation),
                Outcome::Skipped => report.skipped += 1,
                Outcome::Broken(message) => {
                    report.record(operation);
                    push_violation(&mut report, step, operation, message);
                }
            }

            if (step + 1) % self.config.validate_every == 0 {
                check_invariants(&dcel, step, operation, &mut report);
                pending = None;
            } else {
                pending = Some((step, operation));
            }
            after_step(step, operation, &mut dcel);
        }

        // Trailing steps after the last periodic check
        if let Some((step, operation)) = pending {
            check_invariants(&dcel, step, operation, &mut report);
        }

        report.final_edges = dcel.num_edges();
        report.final_vertices = dcel.num_vertices();
        report.final_faces = dcel.num_faces();
        report.final_components = dcel.num_components();
        report.euler_characteristic = dcel.euler_characteristic();
        report.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            seed,
            edges = report.final_edges,
            violations = report.violations.len(),
            "stress run finished"
        );
        report
    }

    fn draw(&self, dcel: &Dcel, rng: &mut StdRng) -> Operation {
        if dcel.is_empty() {
            return Operation::MakeEdge;
        }
        if dcel.num_edges() >= self.config.max_edges {
            return Operation::DeleteEdge;
        }
        Operation::ALL[self.sampler.sample(rng)]
    }

    fn apply(&self, dcel: &mut Dcel, operation: Operation, rng: &mut StdRng) -> Outcome {
        if operation == Operation::MakeEdge {
            let e = dcel.make_edge();
            if dcel.onext(e) != e || dcel.lnext(e) != dcel.sym(e) {
                return Outcome::Broken("fresh edge is not a self loop".into());
            }
            return Outcome::Applied;
        }

        let Some(e1) = random_half_edge(dcel, rng) else {
            return Outcome::Skipped;
        };
        match operation {
            Operation::MakeEdge => unreachable!("make_edge takes no operand"),
            Operation::Splice => {
                let Some(e2) = random_half_edge(dcel, rng) else {
                    return Outcome::Skipped;
                };
                splice_step(dcel, e1, e2)
            }
            Operation::Connect => {
                let e2 = if rng.gen_bool(0.5) {
                    let face = dcel.left(e1);
                    let idx = rng.gen_range(0..dcel.face_len(face));
                    dcel.face_ring(face).nth(idx)
                } else {
                    random_half_edge(dcel, rng)
                };
                let Some(e2) = e2 else {
                    return Outcome::Skipped;
                };
                connect_step(dcel, e1, e2, rng.gen_bool(0.25))
            }
            Operation::DeleteEdge => {
                let before = dcel.num_edges();
                dcel.delete_edge(e1);
                if dcel.num_edges() + 1 != before || dcel.contains_half_edge(e1) {
                    return Outcome::Broken("delete_edge left the edge alive".into());
                }
                Outcome::Applied
            }
            Operation::AddEdgeVertex => {
                let enew = dcel.add_edge_vertex(e1);
                if dcel.org(enew) != dcel.dest(e1) || dcel.degree(dcel.dest(enew)) != 1 {
                    return Outcome::Broken("add_edge_vertex did not hang a new vertex".into());
                }
                Outcome::Applied
            }
            Operation::SplitEdge => {
                let (a, b) = (dcel.org(e1), dcel.dest(e1));
                let r = dcel.split_edge(e1);
                if dcel.org(e1) != a || dcel.dest(r) != b || dcel.dest(e1) != dcel.org(r) {
                    return Outcome::Broken("split_edge produced wrong endpoints".into());
                }
                Outcome::Applied
            }
        }
    }
}

fn random_half_edge(dcel: &Dcel, rng: &mut StdRng) -> Option<HalfEdgeId> {
    if dcel.is_empty() {
        return None;
    }
    let e = dcel.edges().nth(rng.gen_range(0..dcel.num_edges()))?;
    Some(if rng.gen_bool(0.5) { dcel.sym(e) } else { e })
}

fn splice_step(dcel: &mut Dcel, e1: HalfEdgeId, e2: HalfEdgeId) -> Outcome {
    let labels = dcel.component_labels();
    if labels[dcel.org(e1)] != labels[dcel.org(e2)] {
        dcel.splice(e1, e2);
        return Outcome::Applied;
    }

    let before = [dcel.onext(e1), dcel.onext(e2), dcel.lnext(e1), dcel.lnext(e2)];
    dcel.splice(e1, e2);
    dcel.splice(e1, e2);
    let after = [dcel.onext(e1), dcel.onext(e2), dcel.lnext(e1), dcel.lnext(e2)];
    if before != after {
        return Outcome::Broken("splice applied twice did not restore the rings".into());
    }
    Outcome::Applied
}

fn connect_step(dcel: &mut Dcel, e1: HalfEdgeId, e2: HalfEdgeId, undo: bool) -> Outcome {
    if dcel.left(e1) != dcel.left(e2) {
        let labels = dcel.component_labels();
        if labels[dcel.org(e1)] == labels[dcel.org(e2)] {
            // Joining two faces of one component would add a handle
            return Outcome::Skipped;
        }
    }

    let before = [dcel.onext(e1), dcel.onext(e2), dcel.lnext(e1), dcel.lnext(e2)];
    let (from, to) = (dcel.dest(e1), dcel.org(e2));
    let e3 = dcel.connect(e1, e2);
    if dcel.org(e3) != from || dcel.dest(e3) != to {
        return Outcome::Broken("connect produced wrong endpoints".into());
    }

    if undo {
        dcel.delete_edge(e3);
        let after = [dcel.onext(e1), dcel.onext(e2), dcel.lnext(e1), dcel.lnext(e2)];
        if before != after {
            return Outcome::Broken("delete_edge did not undo connect".into());
        }
    }
    Outcome::Applied
}

fn check_invariants(dcel: &Dcel, step: usize, operation: Operation, report: &mut StressReport) {
    report.validations += 1;
    for error in dcel.validate().errors {
        push_violation(report, step, operation, error.to_string());
    }

    let components = dcel.num_components() as i64;
    let chi = dcel.euler_characteristic();
    if chi != 2 * components {
        push_violation(
            report,
            step,
            operation,
            format!("Euler characteristic {chi} != 2 x {components} components"),
        );
    }
}

fn push_violation(report: &mut StressReport, step: usize, operation: Operation, message: String) {
    warn!(seed = report.seed, step, %operation, %message, "invariant violated");
    report.violations.push(Violation {
        step,
        operation,
        message,
    });
}
