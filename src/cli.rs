use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cashflow scheduler — solve, validate, and resume 30-day work-and-cashflow
/// plans.
#[derive(Parser)]
#[command(name = "cashflow-scheduler", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Solve a plan JSON file and print the schedule.
    Solve {
        /// Path to the plan JSON file.
        file: PathBuf,

        /// Which solver to use.
        #[arg(long, default_value = "auto")]
        solver: String,

        /// Output format: md (default), csv, or json.
        #[arg(long, default_value = "md")]
        format: String,
    },

    /// Validate a plan + schedule pair without solving.
    Validate {
        /// Path to the plan JSON file.
        plan: PathBuf,
        /// Path to a schedule JSON file (as produced by `solve --format json`).
        schedule: PathBuf,
    },

    /// Resume a plan: lock the baseline prefix through `day`, inject a
    /// corrective adjustment so day `day`'s closing equals `eod-amount`, and
    /// re-solve the tail.
    Resume {
        /// Path to the plan JSON file.
        file: PathBuf,

        /// 1-indexed day whose closing balance should match `--eod-amount`.
        #[arg(long)]
        day: u8,

        /// Desired end-of-day balance in decimal dollars.
        #[arg(long)]
        eod_amount: f64,

        /// Output format: md (default), csv, or json.
        #[arg(long, default_value = "md")]
        format: String,
    },

    /// Cross-check the DP solver against the independent CP search and
    /// report whether their objectives agree (requires the `cp-solver`
    /// feature).
    Verify {
        /// Path to the plan JSON file.
        file: PathBuf,

        /// Maximum number of distinct tied optima to enumerate.
        #[arg(long, default_value_t = 5)]
        ties: usize,
    },

    /// Run the HTTP API (requires the `full` feature).
    Api {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value = "8080")]
        port: u16,
    },
}
