//! Error types for the MongoDB sink.

use measurement_populate::PopulateError;
use thiserror::Error;

/// Errors that can occur while writing to MongoDB.
#[derive(Error, Debug)]
pub enum MongoDBSinkError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),
}

impl From<MongoDBSinkError> for PopulateError {
    fn from(err: MongoDBSinkError) -> Self {
        PopulateError::Sink(err.to_string())
    }
}
