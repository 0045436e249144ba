//! The full set of cells a run will generate.

use crate::days::DayRange;
use crate::measurement::{source_name, Cell};
use crate::synthesizer::{GeneratorError, MeasurementSynthesizer, ANCHORS_PER_CELL, BLOCKS_PER_CELL};
use chrono::{DateTime, Utc};
use measurement_config::{Config, ValueDistribution};
use rand::Rng;

/// Days, sources and attributes of a run, and the counts they imply.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    days: DayRange,
    sources: Vec<String>,
    attributes: Vec<String>,
    measurements_in_block: u32,
    values: ValueDistribution,
}

impl GenerationPlan {
    pub fn new(config: &Config) -> Self {
        Self {
            days: DayRange::from(&config.time_line),
            sources: (1..=config.sources).map(source_name).collect(),
            attributes: config.attributes.clone(),
            measurements_in_block: config.measurements_in_block,
            values: config.values,
        }
    }

    pub fn days(&self) -> &DayRange {
        &self.days
    }

    pub fn source_names(&self) -> &[String] {
        &self.sources
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn measurements_in_block(&self) -> u32 {
        self.measurements_in_block
    }

    /// Records per cell: `3 + 4 * measurements_in_block`.
    pub fn measurements_per_cell(&self) -> u64 {
        ANCHORS_PER_CELL as u64 + BLOCKS_PER_CELL as u64 * self.measurements_in_block as u64
    }

    /// Number of (day, source, attribute) cells.
    pub fn cell_count(&self) -> u64 {
        self.days.len() as u64 * self.sources.len() as u64 * self.attributes.len() as u64
    }

    /// Records a complete run persists:
    /// `sources * attributes * days * (3 + 4 * measurements_in_block)`.
    pub fn expected_total(&self) -> u64 {
        self.cell_count() * self.measurements_per_cell()
    }

    /// Cells of one day, sources outermost, attributes in configured order.
    pub fn cells_for_day(&self, day: DateTime<Utc>) -> impl Iterator<Item = Cell> + '_ {
        self.sources.iter().flat_map(move |source| {
            self.attributes
                .iter()
                .map(move |attribute| Cell::new(day, source.as_str(), attribute.as_str()))
        })
    }

    /// Every cell of the run in day, source, attribute order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.days.iter().flat_map(move |day| self.cells_for_day(day))
    }

    /// Synthesizer for this plan's distribution and block size.
    pub fn synthesizer<R: Rng>(&self, rng: R) -> Result<MeasurementSynthesizer<R>, GeneratorError> {
        MeasurementSynthesizer::new(rng, self.values, self.measurements_in_block)
    }
}

/// RNG seed for the day at `day_index`.
///
/// Derived from the run seed so any day can be generated independently of the
/// others while staying reproducible.
pub fn day_seed(seed: u64, day_index: u64) -> u64 {
    seed.wrapping_add(day_index.wrapping_mul(0x9E3779B97F4A7C15))
}
