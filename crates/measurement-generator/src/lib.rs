//! Synthetic measurement generator for the measurement loader.
//!
//! This crate turns a [`Config`](measurement_config::Config) into a fixed,
//! computable stream of measurement records and, optionally, a per-cell
//! validation summary that a downstream consumer can compare its own
//! aggregates against.
//!
//! # Architecture
//!
//! ```text
//! Config (YAML)
//!        │
//!        ▼
//! ┌──────────────────┐      ┌─────────────────────────┐
//! │  GenerationPlan  │─────▶│ Cell (day, source, attr) │
//! │  - DayRange      │      └────────────┬────────────┘
//! │  - source names  │                   │
//! └──────────────────┘                   ▼
//!                          ┌──────────────────────────┐
//!                          │ MeasurementSynthesizer   │
//!                          │  - rng (StdRng)          │
//!                          │  3 anchors + 4 blocks    │
//!                          └────────────┬─────────────┘
//!                                       │ Measurement
//!                          ┌────────────┴─────────────┐
//!                          ▼                          ▼
//!                     sink batches          CellAccumulator ─▶ ValidationSummary
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use measurement_config::ValueDistribution;
//! use measurement_generator::{Cell, DayRange, MeasurementSynthesizer};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let days = DayRange::new(
//!     NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2019, 1, 3).unwrap(),
//! );
//! let values = ValueDistribution { minimum: 0.0, q1: 10.0, median: 20.0, q3: 30.0, maximum: 100.0 };
//! let mut synthesizer = MeasurementSynthesizer::new(StdRng::seed_from_u64(42), values, 10).unwrap();
//!
//! for day in days.iter() {
//!     let cell = Cell::new(day, "/data_sources/00001", "temperature");
//!     let records: Vec<_> = synthesizer.cell_records(&cell).collect();
//!     assert_eq!(records.len(), 43);
//!     assert_eq!(records[0].value, 10.0);
//! }
//! ```

pub mod days;
pub mod measurement;
pub mod plan;
pub mod summary;
pub mod synthesizer;

// Re-exports for convenience
pub use days::{DayRange, Days};
pub use measurement::{source_name, Cell, Measurement};
pub use plan::{day_seed, GenerationPlan};
pub use summary::{CellAccumulator, CellSummary, SummaryError, ValidationSummary};
pub use synthesizer::{
    GeneratorError, MeasurementSynthesizer, ANCHORS_PER_CELL, BLOCKS_PER_CELL, VALUE_MARGIN,
};
