// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! DCEL stress CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use planar_dcel::stress::{StressConfig, StressReport, StressRunner, CONFIG_FILE};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "dcel-stress")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Randomized invariant checking for the planar DCEL operators", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run randomized operator sequences and validate after each step
    Run {
        /// Config file (defaults to stress.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the seed of the first run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Override the number of runs
        #[arg(short, long)]
        runs: Option<usize>,

        /// Override the operations per run
        #[arg(short, long)]
        operations: Option<usize>,

        /// Write the reports as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Write a default config file
    InitConfig {
        /// Output path
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            config,
            seed,
            runs,
            operations,
            json,
        } => {
            let mut config = match config {
                Some(path) => {
                    let mut config = StressConfig::from_file(&path)?;
                    config.apply_env()?;
                    config
                }
                None => StressConfig::load()?,
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(runs) = runs {
                config.iterations = runs;
            }
            if let Some(operations) = operations {
                config.operations_per_run = operations;
            }
            run(config, json)
        }
        Commands::InitConfig { path } => {
            StressConfig::default().save(&path)?;
            println!("{} {}", "✓".green(), format!("Wrote {}", path.display()).bold());
            Ok(())
        }
    }
}

fn run(config: StressConfig, json: Option<PathBuf>) -> Result<()> {
    info!(
        seed = config.seed,
        runs = config.iterations,
        operations = config.operations_per_run,
        "starting stress runs"
    );
    let runner = StressRunner::new(config)?;

    let reports = if runner.config().iterations == 1 {
        let total = runner.config().operations_per_run as u64;
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ops")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        let report = runner.run_seed_with(runner.config().seed, |_| pb.inc(1));
        pb.finish_and_clear();
        vec![report]
    } else {
        runner.run_many()
    };

    for report in &reports {
        print_report(report);
    }

    if let Some(path) = json {
        let content = serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write report: {:?}", path))?;
        println!("\n{} {}", "Report:".bold(), path.display().to_string().cyan());
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    println!("\n{}", "━".repeat(60).bright_black());
    if failed == 0 {
        println!(
            "{} {}",
            "✅".green(),
            format!("{} run(s) passed", reports.len()).green().bold()
        );
        Ok(())
    } else {
        println!(
            "{} {}",
            "❌".red(),
            format!("{} of {} run(s) failed", failed, reports.len()).red().bold()
        );
        std::process::exit(1);
    }
}

fn print_report(report: &StressReport) {
    let status = if report.passed() {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!(
        "{} seed {:<8} {:>6} ops ({} skipped)  V={} E={} F={} C={}  {:.1} ms",
        status,
        report.seed,
        report.total_operations(),
        report.skipped,
        report.final_vertices,
        report.final_edges,
        report.final_faces,
        report.final_components,
        report.duration_ms,
    );
    for (operation, count) in &report.operations {
        println!("    {:<16} {}", operation.name().bright_black(), count);
    }
    for violation in report.violations.iter().take(10) {
        println!(
            "    {} step {} ({}): {}",
            "✗".red(),
            violation.step,
            violation.operation,
            violation.message.yellow()
        );
    }
    if report.violations.len() > 10 {
        println!("    ... {} more", report.violations.len() - 10);
    }
}
