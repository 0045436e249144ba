//! Outcome of a population run.

use crate::error::PopulateError;
use measurement_generator::ValidationSummary;
use std::time::Duration;

/// Result of comparing the persisted record count with the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyCheck {
    Passed { count: u64 },
    Failed { expected: u64, actual: u64 },
}

impl ConsistencyCheck {
    pub fn evaluate(expected: u64, actual: u64) -> Self {
        if expected == actual {
            ConsistencyCheck::Passed { count: actual }
        } else {
            ConsistencyCheck::Failed { expected, actual }
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, ConsistencyCheck::Passed { .. })
    }

    /// Turn a failed check into an error carrying both counts.
    pub fn ensure(self) -> Result<u64, PopulateError> {
        match self {
            ConsistencyCheck::Passed { count } => Ok(count),
            ConsistencyCheck::Failed { expected, actual } => {
                Err(PopulateError::ConsistencyCheckFailed { expected, actual })
            }
        }
    }
}

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of records acknowledged by the sink.
    pub rows_inserted: u64,
    /// Number of cells generated.
    pub cells_generated: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data, summed over workers.
    pub generation_duration: Duration,
    /// Time spent inserting data, summed over workers.
    pub insert_duration: Duration,
    /// Number of batches executed.
    pub batch_count: u64,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Add the counters of a worker. Total duration is left untouched.
    pub fn absorb(&mut self, other: &PopulateMetrics) {
        self.rows_inserted += other.rows_inserted;
        self.cells_generated += other.cells_generated;
        self.generation_duration += other.generation_duration;
        self.insert_duration += other.insert_duration;
        self.batch_count += other.batch_count;
    }
}

/// Everything a population run produced.
#[derive(Debug, Clone)]
pub struct PopulateReport {
    /// Records the configuration predicts.
    pub expected: u64,
    /// Persisted count compared with `expected`.
    pub check: ConsistencyCheck,
    pub metrics: PopulateMetrics,
    /// Per-cell statistics, when collection was enabled.
    pub summary: Option<ValidationSummary>,
}
