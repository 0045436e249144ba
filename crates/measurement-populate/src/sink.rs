//! The storage boundary the populator writes through.

use crate::error::PopulateError;
use async_trait::async_trait;
use measurement_generator::Measurement;

/// Destination for generated measurements.
///
/// Handles are cloned into parallel workers, so implementations must be safe
/// to share. Each [`insert_batch`](Self::insert_batch) call is one atomic write
/// from the populator's point of view; records of different batches are never
/// interleaved within a call.
#[async_trait]
pub trait MeasurementSink: Send + Sync {
    /// Reset the target: drop old collections and create the query indexes.
    async fn prepare(&self) -> Result<(), PopulateError>;

    /// Persist a batch and return how many records the sink acknowledged.
    async fn insert_batch(&self, batch: &[Measurement]) -> Result<u64, PopulateError>;

    /// Number of records currently stored.
    async fn count_documents(&self) -> Result<u64, PopulateError>;

    /// Release the connection.
    async fn close(&self) -> Result<(), PopulateError>;
}
