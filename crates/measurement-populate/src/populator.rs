//! Orchestration of a full population run.

use crate::batch::{BatchWriter, DEFAULT_BATCH_SIZE};
use crate::error::PopulateError;
use crate::report::{ConsistencyCheck, PopulateMetrics, PopulateReport};
use crate::sink::MeasurementSink;
use chrono::{DateTime, Utc};
use measurement_config::Config;
use measurement_generator::{
    day_seed, CellAccumulator, GenerationPlan, ValidationSummary, BLOCKS_PER_CELL,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Tuning knobs of a run.
#[derive(Debug, Clone, Copy)]
pub struct PopulateOptions {
    /// Base seed; each day derives its own RNG seed from it
    pub seed: u64,
    /// Records per insert
    pub batch_size: usize,
    /// Number of concurrent workers; days are dealt to them round-robin
    pub workers: usize,
    /// Collect per-cell validation statistics
    pub collect_summary: bool,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            batch_size: DEFAULT_BATCH_SIZE,
            workers: 1,
            collect_summary: false,
        }
    }
}

/// Generates every cell of a plan into a sink and verifies the result.
pub struct Populator<S> {
    sink: S,
    plan: Arc<GenerationPlan>,
    options: PopulateOptions,
}

/// What one worker produced for its share of days.
struct WorkerOutput {
    metrics: PopulateMetrics,
    summary: ValidationSummary,
}

impl<S> Populator<S>
where
    S: MeasurementSink + Clone + 'static,
{
    /// Create a populator for `config` writing into `sink`.
    pub fn new(config: &Config, sink: S) -> Self {
        Self {
            sink,
            plan: Arc::new(GenerationPlan::new(config)),
            options: PopulateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PopulateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.seed = seed;
        self
    }

    /// Set the batch size for insert operations.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.options.batch_size = batch_size;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.options.workers = workers;
        self
    }

    pub fn with_validation_summary(mut self, enabled: bool) -> Self {
        self.options.collect_summary = enabled;
        self
    }

    pub fn plan(&self) -> &GenerationPlan {
        &self.plan
    }

    pub fn options(&self) -> &PopulateOptions {
        &self.options
    }

    /// Run the whole population.
    ///
    /// Prepares the sink, generates every cell, waits for all workers, then
    /// reads the persisted count once and compares it with the prediction.
    /// A mismatch is reported in [`PopulateReport::check`]; sink and generator
    /// failures abort the run with an error. The sink is closed either way.
    pub async fn populate(self) -> Result<PopulateReport, PopulateError> {
        let start_time = Instant::now();
        let expected = self.plan.expected_total();

        // Reject an unusable distribution before touching the sink.
        self.plan.synthesizer(StdRng::seed_from_u64(self.options.seed))?;

        info!(
            "Populating {} measurements: {} days x {} sources x {} attributes x {} per cell (seed={}, batch size={}, workers={})",
            expected,
            self.plan.days().len(),
            self.plan.source_names().len(),
            self.plan.attributes().len(),
            self.plan.measurements_per_cell(),
            self.options.seed,
            self.options.batch_size,
            self.options.workers
        );

        self.sink.prepare().await?;

        let outcome = self.generate_and_count().await;
        let closed = self.sink.close().await;
        let (mut metrics, summary, actual) = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Err(close_error) = closed {
                    warn!("Failed to close sink after error: {}", close_error);
                }
                return Err(e);
            }
        };
        closed?;
        let check = ConsistencyCheck::evaluate(expected, actual);

        metrics.total_duration = start_time.elapsed();

        info!(
            "Population complete: {} measurements in {:?} ({:.2} docs/sec, {} batches)",
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.rows_per_second(),
            metrics.batch_count
        );

        Ok(PopulateReport {
            expected,
            check,
            metrics,
            summary: self.options.collect_summary.then_some(summary),
        })
    }

    /// Run every worker to completion, then read the persisted count once so
    /// the comparison and the report use the same value.
    ///
    /// The first failing worker stops the others before the error is returned.
    async fn generate_and_count(
        &self,
    ) -> Result<(PopulateMetrics, ValidationSummary, u64), PopulateError> {
        let mut tasks = JoinSet::new();
        for days in self.assign_days() {
            tasks.spawn(populate_days(
                self.sink.clone(),
                Arc::clone(&self.plan),
                days,
                self.options,
            ));
        }

        let mut metrics = PopulateMetrics::default();
        let mut summary = ValidationSummary::new();
        while let Some(joined) = tasks.join_next().await {
            let output = match joined.map_err(|e| PopulateError::Worker(e.to_string())) {
                Ok(Ok(output)) => output,
                Ok(Err(e)) | Err(e) => {
                    tasks.shutdown().await;
                    return Err(e);
                }
            };
            metrics.absorb(&output.metrics);
            summary.merge(output.summary);
        }

        let actual = self.sink.count_documents().await?;
        Ok((metrics, summary, actual))
    }

    /// Deal `(day_index, day)` pairs to workers round-robin.
    fn assign_days(&self) -> Vec<Vec<(u64, DateTime<Utc>)>> {
        let workers = self.options.workers.clamp(1, self.plan.days().len().max(1));
        let mut assignments = vec![Vec::new(); workers];
        for (index, day) in self.plan.days().iter().enumerate() {
            assignments[index % workers].push((index as u64, day));
        }
        assignments
    }
}

/// Generate and write every cell of the given days.
async fn populate_days<S: MeasurementSink>(
    sink: S,
    plan: Arc<GenerationPlan>,
    days: Vec<(u64, DateTime<Utc>)>,
    options: PopulateOptions,
) -> Result<WorkerOutput, PopulateError> {
    let started = Instant::now();
    let mut writer = BatchWriter::new(sink, options.batch_size);
    let mut summary = ValidationSummary::new();
    let mut cells_generated = 0u64;

    for (day_index, day) in days {
        let rng = StdRng::seed_from_u64(day_seed(options.seed, day_index));
        let mut synthesizer = plan.synthesizer(rng)?;

        for cell in plan.cells_for_day(day) {
            let mut accumulator = options.collect_summary.then(CellAccumulator::begin);

            for measurement in synthesizer.anchors(&cell) {
                if let Some(accumulator) = accumulator.as_mut() {
                    accumulator.observe(measurement.value);
                }
                writer.push(measurement).await?;
            }
            writer.flush().await?;

            for _ in 0..BLOCKS_PER_CELL {
                for measurement in synthesizer.block(&cell) {
                    if let Some(accumulator) = accumulator.as_mut() {
                        accumulator.observe(measurement.value);
                    }
                    writer.push(measurement).await?;
                }
                writer.flush().await?;
            }

            if let Some(accumulator) = accumulator {
                summary.record(&cell, accumulator.end());
            }
            cells_generated += 1;
        }

        debug!("Day {} complete ({} cells so far)", day.date_naive(), cells_generated);
    }

    let elapsed = started.elapsed();
    let metrics = PopulateMetrics {
        rows_inserted: writer.rows_inserted(),
        cells_generated,
        total_duration: elapsed,
        generation_duration: elapsed.saturating_sub(writer.insert_duration()),
        insert_duration: writer.insert_duration(),
        batch_count: writer.batch_count(),
    };

    Ok(WorkerOutput { metrics, summary })
}
