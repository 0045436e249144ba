//! Error types for population runs.

use measurement_generator::GeneratorError;
use thiserror::Error;

/// Errors that can occur while populating a sink.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Sink connection, write or query failure.
    #[error("Sink error: {0}")]
    Sink(String),

    /// Generator could not be built for the configured distribution.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// A worker task panicked or was cancelled.
    #[error("Worker failed: {0}")]
    Worker(String),

    /// The sink does not hold the predicted number of records.
    #[error(
        "Number of documents that should be sent ({expected}) is not equal to the number of documents in the collection ({actual})"
    )]
    ConsistencyCheckFailed { expected: u64, actual: u64 },
}

impl PopulateError {
    pub fn sink(err: impl std::fmt::Display) -> Self {
        PopulateError::Sink(err.to_string())
    }
}
