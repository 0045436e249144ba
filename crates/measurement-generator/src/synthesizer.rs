//! Per-cell measurement synthesis.

use crate::measurement::{Cell, Measurement};
use chrono::{DateTime, Duration, Utc};
use measurement_config::ValueDistribution;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Number of uniform blocks emitted after the anchors of every cell.
pub const BLOCKS_PER_CELL: u32 = 4;

/// Number of anchor records (`q1`, `median`, `q3`) at the start of every cell.
pub const ANCHORS_PER_CELL: u32 = 3;

/// Distance kept between uniform values and the distribution bounds.
pub const VALUE_MARGIN: f64 = 1e-5;

const NANOS_PER_DAY: i64 = 24 * 60 * 60 * 1_000_000_000;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// No room for uniform values between the bounds once the margin is applied
    #[error("Empty sampling range: minimum {minimum} and maximum {maximum} leave no interior values")]
    EmptyRange { minimum: f64, maximum: f64 },

    /// The width of the sampling range is not representable as an `f64`
    #[error("Sampling range overflow: the distance between minimum {minimum} and maximum {maximum} is not finite")]
    RangeOverflow { minimum: f64, maximum: f64 },
}

/// Produces the measurement records of a cell.
///
/// Randomness comes only from the injected generator, so seeding it (e.g.
/// `StdRng::seed_from_u64`) makes the output reproducible.
pub struct MeasurementSynthesizer<R> {
    rng: R,
    values: ValueDistribution,
    /// `None` when blocks are empty and no value is ever sampled
    uniform: Option<Uniform<f64>>,
    lower: f64,
    measurements_in_block: u32,
}

impl<R: Rng> MeasurementSynthesizer<R> {
    /// Create a synthesizer drawing from `rng`.
    ///
    /// Fails when `measurements_in_block > 0` and the open interval
    /// `(minimum + VALUE_MARGIN, maximum - VALUE_MARGIN)` is empty, or when
    /// its width overflows.
    pub fn new(
        rng: R,
        values: ValueDistribution,
        measurements_in_block: u32,
    ) -> Result<Self, GeneratorError> {
        let lower = values.minimum + VALUE_MARGIN;
        let upper = values.maximum - VALUE_MARGIN;

        let uniform = if measurements_in_block == 0 {
            None
        } else if lower < upper {
            // Uniform::new panics when the width is not finite.
            if !(upper - lower).is_finite() {
                return Err(GeneratorError::RangeOverflow {
                    minimum: values.minimum,
                    maximum: values.maximum,
                });
            }
            Some(Uniform::new(lower, upper))
        } else {
            return Err(GeneratorError::EmptyRange {
                minimum: values.minimum,
                maximum: values.maximum,
            });
        };

        Ok(Self {
            rng,
            values,
            uniform,
            lower,
            measurements_in_block,
        })
    }

    /// Records emitted per cell: `3 + 4 * measurements_in_block`.
    pub fn measurements_per_cell(&self) -> u64 {
        ANCHORS_PER_CELL as u64 + BLOCKS_PER_CELL as u64 * self.measurements_in_block as u64
    }

    pub fn measurements_in_block(&self) -> u32 {
        self.measurements_in_block
    }

    /// The three anchor records of a cell, valued `q1`, `median`, `q3` in that order.
    pub fn anchors(&mut self, cell: &Cell) -> [Measurement; 3] {
        self.values
            .anchors()
            .map(|value| self.record(cell, value))
    }

    /// One block of `measurements_in_block` uniformly distributed records.
    pub fn block<'a>(&'a mut self, cell: &'a Cell) -> Block<'a, R> {
        let remaining = self.measurements_in_block;
        Block {
            synthesizer: self,
            cell,
            remaining,
        }
    }

    /// Every record of a cell in emission order: anchors, then the four blocks.
    pub fn cell_records<'a>(&'a mut self, cell: &'a Cell) -> CellRecords<'a, R> {
        let total = self.measurements_per_cell();
        CellRecords {
            synthesizer: self,
            cell,
            emitted: 0,
            total,
        }
    }

    fn record(&mut self, cell: &Cell, value: f64) -> Measurement {
        let timestamp = self.timestamp_within(cell.day);
        cell.measurement(timestamp, value)
    }

    /// Random instant in `[day, day + 24h)`.
    fn timestamp_within(&mut self, day: DateTime<Utc>) -> DateTime<Utc> {
        day + Duration::nanoseconds(self.rng.gen_range(0..NANOS_PER_DAY))
    }

    /// Uniform value strictly inside the margin-adjusted bounds.
    fn sample_value(&mut self) -> Option<f64> {
        let uniform = self.uniform.as_ref()?;
        loop {
            let value = uniform.sample(&mut self.rng);
            // Uniform yields [lower, upper); the lower bound itself is excluded.
            if value > self.lower {
                return Some(value);
            }
        }
    }
}

/// Iterator over the uniform records of one block.
pub struct Block<'a, R> {
    synthesizer: &'a mut MeasurementSynthesizer<R>,
    cell: &'a Cell,
    remaining: u32,
}

impl<R: Rng> Iterator for Block<'_, R> {
    type Item = Measurement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let value = self.synthesizer.sample_value()?;
        Some(self.synthesizer.record(self.cell, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Block<'_, R> {}

/// Iterator over every record of a cell.
pub struct CellRecords<'a, R> {
    synthesizer: &'a mut MeasurementSynthesizer<R>,
    cell: &'a Cell,
    emitted: u64,
    total: u64,
}

impl<R: Rng> Iterator for CellRecords<'_, R> {
    type Item = Measurement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.total {
            return None;
        }

        let index = self.emitted;
        self.emitted += 1;

        let value = match self.synthesizer.values.anchors().get(index as usize) {
            Some(anchor) => *anchor,
            None => self.synthesizer.sample_value()?,
        };
        Some(self.synthesizer.record(self.cell, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for CellRecords<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn values() -> ValueDistribution {
        ValueDistribution {
            minimum: 0.0,
            q1: 10.0,
            median: 20.0,
            q3: 30.0,
            maximum: 100.0,
        }
    }

    fn cell() -> Cell {
        let day = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        Cell::new(day, "/data_sources/00001", "temperature")
    }

    fn synthesizer(seed: u64, measurements_in_block: u32) -> MeasurementSynthesizer<StdRng> {
        MeasurementSynthesizer::new(StdRng::seed_from_u64(seed), values(), measurements_in_block)
            .unwrap()
    }

    #[test]
    fn test_cell_record_count() {
        let cell = cell();
        for n in [0, 1, 10, 128, 300] {
            let mut synthesizer = synthesizer(42, n);
            let records: Vec<_> = synthesizer.cell_records(&cell).collect();
            assert_eq!(records.len() as u64, 3 + 4 * n as u64);
            assert_eq!(records.len() as u64, synthesizer.measurements_per_cell());
        }
    }

    #[test]
    fn test_anchors_come_first_in_order() {
        let cell = cell();
        let mut synthesizer = synthesizer(42, 10);

        let values: Vec<f64> = synthesizer.cell_records(&cell).map(|m| m.value).collect();
        assert_eq!(&values[..3], &[10.0, 20.0, 30.0]);

        let anchors = synthesizer.anchors(&cell);
        assert_eq!(anchors.map(|m| m.value), [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_uniform_values_strictly_inside_bounds() {
        let cell = cell();
        let mut synthesizer = synthesizer(7, 1000);

        for record in synthesizer.block(&cell) {
            assert!(record.value > 0.0 + VALUE_MARGIN, "{}", record.value);
            assert!(record.value < 100.0 - VALUE_MARGIN, "{}", record.value);
        }
    }

    #[test]
    fn test_timestamps_within_day() {
        let cell = cell();
        let next_day = cell.day + Duration::days(1);
        let mut synthesizer = synthesizer(42, 250);

        let records: Vec<_> = synthesizer.cell_records(&cell).collect();
        for record in &records {
            assert!(record.timestamp >= cell.day);
            assert!(record.timestamp < next_day);
        }

        // Jitter is rolled per record, including the anchors.
        assert_ne!(records[0].timestamp, records[1].timestamp);
        assert_ne!(records[1].timestamp, records[2].timestamp);
    }

    #[test]
    fn test_records_carry_cell_identity() {
        let cell = cell();
        let mut synthesizer = synthesizer(42, 5);
        for record in synthesizer.cell_records(&cell) {
            assert_eq!(record.source, cell.source);
            assert_eq!(record.attribute, cell.attribute);
        }
    }

    #[test]
    fn test_block_size() {
        let cell = cell();
        let mut synthesizer = synthesizer(42, 17);
        let block = synthesizer.block(&cell);
        assert_eq!(block.len(), 17);
        assert_eq!(block.count(), 17);
    }

    #[test]
    fn test_deterministic_generation() {
        let cell = cell();
        let mut gen1 = synthesizer(42, 20);
        let mut gen2 = synthesizer(42, 20);

        let records1: Vec<_> = gen1.cell_records(&cell).collect();
        let records2: Vec<_> = gen2.cell_records(&cell).collect();
        assert_eq!(records1, records2);

        let mut gen3 = synthesizer(43, 20);
        let records3: Vec<_> = gen3.cell_records(&cell).collect();
        assert_eq!(records1.len(), records3.len());
        assert_ne!(records1, records3);
    }

    #[test]
    fn test_empty_range_rejected() {
        let narrow = ValueDistribution {
            minimum: 0.0,
            q1: 0.000001,
            median: 0.000002,
            q3: 0.000003,
            maximum: 0.000004,
        };
        let result = MeasurementSynthesizer::new(StdRng::seed_from_u64(42), narrow, 1);
        assert!(matches!(result, Err(GeneratorError::EmptyRange { .. })));

        // Without blocks nothing is sampled, so the range does not matter.
        let mut synthesizer =
            MeasurementSynthesizer::new(StdRng::seed_from_u64(42), narrow, 0).unwrap();
        let cell = cell();
        assert_eq!(synthesizer.cell_records(&cell).count(), 3);
    }

    #[test]
    fn test_overflowing_range_rejected() {
        let wide = ValueDistribution {
            minimum: -1e308,
            q1: -1.0,
            median: 0.0,
            q3: 1.0,
            maximum: 1e308,
        };
        let result = MeasurementSynthesizer::new(StdRng::seed_from_u64(1), wide, 1);
        assert!(matches!(result, Err(GeneratorError::RangeOverflow { .. })));

        let mut synthesizer =
            MeasurementSynthesizer::new(StdRng::seed_from_u64(1), wide, 0).unwrap();
        assert_eq!(synthesizer.cell_records(&cell()).count(), 3);
    }
}
