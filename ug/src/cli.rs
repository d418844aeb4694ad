//! CLI argument parsing for uniquegen

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ug")]
#[command(author, version, about = "Generate values that never repeat", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Delegate attempts per value before giving up (overrides config)
    #[arg(short, long)]
    pub max_retries: Option<u32>,

    /// Reset history and allow repeats once values run out
    #[arg(short, long)]
    pub repeat: bool,

    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick unique values from a list of candidates
    Pick {
        /// Candidate values
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Number of values to produce
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Values that must never be produced
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Produce unique integers in a range
    Number {
        /// Lowest value (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min: i64,

        /// Highest value (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        max: i64,

        /// Number of values to produce
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Values that must never be produced
        #[arg(short, long, allow_hyphen_values = true)]
        exclude: Vec<i64>,
    },
}
