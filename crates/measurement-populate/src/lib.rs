//! Population of measurement sinks.
//!
//! This crate drives a [`GenerationPlan`](measurement_generator::GenerationPlan)
//! into a [`MeasurementSink`]: it walks every (day, source, attribute) cell,
//! writes the synthesized records in bounded batches, optionally collects the
//! per-cell validation summary and finally checks that the sink holds exactly
//! the predicted number of records.
//!
//! Sink implementations live in their own crates (`measurement-populate-mongodb`);
//! [`testing::MemorySink`] keeps everything in memory for tests and dry runs.

pub mod args;
pub mod batch;
pub mod error;
pub mod populator;
pub mod report;
pub mod sink;
pub mod testing;

pub use args::CommonPopulateArgs;
pub use batch::{BatchWriter, DEFAULT_BATCH_SIZE};
pub use error::PopulateError;
pub use populator::{PopulateOptions, Populator};
pub use report::{ConsistencyCheck, PopulateMetrics, PopulateReport};
pub use sink::MeasurementSink;
