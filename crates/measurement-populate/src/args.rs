//! Common CLI argument definitions shared by all sinks.

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::populator::PopulateOptions;
use clap::Args;
use std::path::PathBuf;

/// Arguments shared by every populate command.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// Path to the input configuration file
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: PathBuf,

    /// Output file with per-cell statistics of the generated data, used later to
    /// check that the data processor computes the statistics correctly
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Random seed (same seed = same data); a random seed is used when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Batch size for database inserts
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Number of concurrent generation workers
    #[arg(long, default_value = "1")]
    pub workers: usize,

    /// Dry-run mode: generate everything into memory without touching the database
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonPopulateArgs {
    /// Populate options for these arguments, using `seed` when none was given.
    pub fn options(&self, seed: u64) -> PopulateOptions {
        PopulateOptions {
            seed: self.seed.unwrap_or(seed),
            batch_size: self.batch_size,
            workers: self.workers,
            collect_summary: self.output.is_some(),
        }
    }
}
