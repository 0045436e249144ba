//! In-memory sink for tests and dry runs.

use crate::error::PopulateError;
use crate::sink::MeasurementSink;
use async_trait::async_trait;
use measurement_generator::Measurement;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<Measurement>,
    batch_sizes: Vec<usize>,
    prepared: bool,
    closed: bool,
}

/// Sink that keeps every record in memory.
///
/// Clones share the same storage. Each batch is appended under a single lock,
/// so concurrent writers never interleave within a batch.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
    /// Index of a batch that is acknowledged but not stored
    lost_batch: Option<usize>,
    failing_inserts: bool,
    failing_count: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledge the `index`-th batch (0-based) without storing it.
    pub fn with_lost_batch(mut self, index: usize) -> Self {
        self.lost_batch = Some(index);
        self
    }

    /// Reject every insert with a sink error.
    pub fn with_failing_inserts(mut self) -> Self {
        self.failing_inserts = true;
        self
    }

    /// Reject the count query with a sink error.
    pub fn with_failing_count(mut self) -> Self {
        self.failing_count = true;
        self
    }

    /// Snapshot of the stored records in write order.
    pub async fn records(&self) -> Vec<Measurement> {
        self.state.lock().await.records.clone()
    }

    /// Size of every batch received, in arrival order.
    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.state.lock().await.batch_sizes.clone()
    }

    pub async fn is_prepared(&self) -> bool {
        self.state.lock().await.prepared
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }
}

#[async_trait]
impl MeasurementSink for MemorySink {
    async fn prepare(&self) -> Result<(), PopulateError> {
        let mut state = self.state.lock().await;
        state.records.clear();
        state.batch_sizes.clear();
        state.prepared = true;
        state.closed = false;
        Ok(())
    }

    async fn insert_batch(&self, batch: &[Measurement]) -> Result<u64, PopulateError> {
        if self.failing_inserts {
            return Err(PopulateError::sink("insert rejected by memory sink"));
        }

        let mut state = self.state.lock().await;
        let index = state.batch_sizes.len();
        state.batch_sizes.push(batch.len());
        if self.lost_batch != Some(index) {
            state.records.extend_from_slice(batch);
        }
        Ok(batch.len() as u64)
    }

    async fn count_documents(&self) -> Result<u64, PopulateError> {
        if self.failing_count {
            return Err(PopulateError::sink("count rejected by memory sink"));
        }
        Ok(self.state.lock().await.records.len() as u64)
    }

    async fn close(&self) -> Result<(), PopulateError> {
        self.state.lock().await.closed = true;
        Ok(())
    }
}
