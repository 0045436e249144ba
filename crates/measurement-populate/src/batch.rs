//! Bounded batching in front of a sink.

use crate::error::PopulateError;
use crate::sink::MeasurementSink;
use measurement_generator::Measurement;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default number of records per insert.
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Buffers records and hands them to the sink in batches of at most
/// `batch_size`.
///
/// Records are flushed when the buffer fills and on every explicit
/// [`flush`](Self::flush); each record reaches the sink exactly once.
pub struct BatchWriter<S> {
    sink: S,
    buffer: Vec<Measurement>,
    batch_size: usize,
    rows_inserted: u64,
    batch_count: u64,
    insert_duration: Duration,
}

impl<S: MeasurementSink> BatchWriter<S> {
    /// Create a writer. A `batch_size` of 0 is treated as 1.
    pub fn new(sink: S, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            sink,
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            rows_inserted: 0,
            batch_count: 0,
            insert_duration: Duration::ZERO,
        }
    }

    /// Queue a record, flushing first if the buffer is full.
    pub async fn push(&mut self, measurement: Measurement) -> Result<(), PopulateError> {
        self.buffer.push(measurement);
        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Write any buffered records.
    pub async fn flush(&mut self) -> Result<(), PopulateError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let start = Instant::now();
        let inserted = self.sink.insert_batch(&self.buffer).await?;
        self.insert_duration += start.elapsed();

        trace!(
            "Batch {}: {} records written ({} acknowledged)",
            self.batch_count + 1,
            self.buffer.len(),
            inserted
        );

        self.rows_inserted += inserted;
        self.batch_count += 1;
        self.buffer.clear();
        Ok(())
    }

    /// Records in the buffer that have not been written yet.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Records acknowledged by the sink so far.
    pub fn rows_inserted(&self) -> u64 {
        self.rows_inserted
    }

    pub fn batch_count(&self) -> u64 {
        self.batch_count
    }

    /// Time spent waiting on the sink.
    pub fn insert_duration(&self) -> Duration {
        self.insert_duration
    }
}
