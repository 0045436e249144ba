//! Measurement Loader Library
//!
//! Generates synthetic sensor measurements and loads them into MongoDB so a
//! data-processing pipeline can be tested for performance and correctness.
//!
//! # Features
//!
//! - Exact record counts: every (day, source, attribute) cell holds
//!   `3 + 4 * measurements_in_block` records
//! - Deterministic anchors: each cell starts with its `q1`, `median` and `q3` values
//! - Validation summaries: per-cell count, minimum, maximum, sum and mean
//! - Consistency check: the persisted count must match the prediction
//!
//! # CLI Usage
//!
//! ```bash
//! # Load measurements
//! measurement-loader --config config.yaml
//!
//! # Load measurements and write the validation summary
//! measurement-loader --config config.yaml --output validation.json --seed 42
//! ```

pub mod logging;
pub mod populate;

pub use populate::{populate_with_sink, run_populate};
