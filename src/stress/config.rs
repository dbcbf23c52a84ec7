// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stress harness configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`StressConfig::load`]
pub const CONFIG_FILE: &str = "stress.toml";

/// Relative frequency of each operator in a random run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorWeights {
    pub make_edge: u32,
    pub splice: u32,
    pub connect: u32,
    pub delete_edge: u32,
    pub add_edge_vertex: u32,
    pub split_edge: u32,
}

impl Default for OperatorWeights {
    fn default() -> Self {
        Self {
            make_edge: 2,
            splice: 2,
            connect: 4,
            delete_edge: 3,
            add_edge_vertex: 3,
            split_edge: 2,
        }
    }
}

impl OperatorWeights {
    /// Weights in [`Operation::ALL`](super::Operation::ALL) order
    pub fn as_array(&self) -> [u32; 6] {
        [
            self.make_edge,
            self.splice,
            self.connect,
            self.delete_edge,
            self.add_edge_vertex,
            self.split_edge,
        ]
    }
}

/// Stress run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Number of independent runs for `run_many`
    pub iterations: usize,
    /// Operators applied per run
    pub operations_per_run: usize,
    /// Seed of the first run; run `i` uses `seed + i`
    pub seed: u64,
    /// Soft cap on live edges; above it only deletions are drawn
    pub max_edges: usize,
    /// Run full validation every N operations (and always at the end)
    pub validate_every: usize,
    /// Operator mix
    pub weights: OperatorWeights,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            iterations: 8,
            operations_per_run: 2_000,
            seed: 0x5eed,
            max_edges: 256,
            validate_every: 1,
            weights: OperatorWeights::default(),
        }
    }
}

impl StressConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: StressConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `stress.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `DCEL_STRESS_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(seed) = std::env::var("DCEL_STRESS_SEED") {
            self.seed = seed
                .parse()
                .with_context(|| format!("Invalid DCEL_STRESS_SEED: {seed}"))?;
        }
        if let Ok(iterations) = std::env::var("DCEL_STRESS_ITERATIONS") {
            self.iterations = iterations
                .parse()
                .with_context(|| format!("Invalid DCEL_STRESS_ITERATIONS: {iterations}"))?;
        }
        if let Ok(operations) = std::env::var("DCEL_STRESS_OPERATIONS") {
            self.operations_per_run = operations
                .parse()
                .with_context(|| format!("Invalid DCEL_STRESS_OPERATIONS: {operations}"))?;
        }
        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Reject configurations the runner cannot execute
    pub fn validate(&self) -> Result<()> {
        if self.validate_every == 0 {
            bail!("validate_every must be at least 1");
        }
        if self.max_edges == 0 {
            bail!("max_edges must be at least 1");
        }
        if self.weights.as_array().iter().all(|&w| w == 0) {
            bail!("at least one operator weight must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(StressConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_weights_rejected() {
        let config = StressConfig {
            weights: OperatorWeights {
                make_edge: 0,
                splice: 0,
                connect: 0,
                delete_edge: 0,
                add_edge_vertex: 0,
                split_edge: 0,
            },
            ..StressConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StressConfig = toml::from_str(
            r#"
            seed = 42
            [weights]
            splice = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.weights.splice, 0);
        assert_eq!(config.weights.connect, OperatorWeights::default().connect);
        assert_eq!(config.operations_per_run, StressConfig::default().operations_per_run);
    }
}
