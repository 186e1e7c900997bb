use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collar strategy scanner — enumerate, price, filter, and rank
/// put/call collars from an option-chain snapshot.
#[derive(Parser)]
#[command(name = "collar-scan", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan an option-chain CSV and rank collar candidates
    Scan {
        /// Path to the chain CSV (omit to use --data-dir)
        input: Option<PathBuf>,

        /// Directory of timestamped chain CSVs; the newest one is used
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path to a policy JSON file
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Built-in policy preset (see `presets`)
        #[arg(long, conflicts_with = "policy")]
        preset: Option<String>,

        /// Valuation date for greeks (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Annualized risk-free rate in percent (overrides the policy)
        #[arg(long)]
        risk_free_rate: Option<f64>,

        /// Write ranked results as CSV to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print ingestion counters and per-metric rank breakdowns
        #[arg(long)]
        verbose: bool,
    },

    /// Validate a policy JSON file
    Validate {
        /// Path to the policy JSON file
        file: PathBuf,
    },

    /// Output the JSON schema for policy files
    Schema,

    /// Output an example policy JSON to stdout
    Example,

    /// List the built-in policy presets
    Presets,
}
