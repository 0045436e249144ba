//! Streaming validation statistics per cell.
//!
//! Every cell gets its own [`CellAccumulator`], fed each value as it is
//! generated and closed with [`CellAccumulator::end`] once the cell is done.
//! Closed summaries are collected into a [`ValidationSummary`] keyed by
//! day (`YYYY-MM-DD`), source and attribute, which is written out once at
//! the end of a run.

use crate::measurement::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Error type for reading and writing validation summaries.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Failed to access summary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Running statistics of an open cell.
///
/// Keeps only count, extremes and sum, never the values themselves.
/// The sum is a plain `f64`; configuration validation keeps
/// `max(|minimum|, |maximum|) * count` finite so it never overflows to
/// infinity, which JSON cannot represent.
/// [`end`](Self::end) consumes the accumulator, so a closed cell cannot be
/// observed again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAccumulator {
    count: u64,
    minimum: f64,
    maximum: f64,
    sum: f64,
}

impl CellAccumulator {
    /// Open a cell with no observations.
    pub fn begin() -> Self {
        Self {
            count: 0,
            minimum: f64::INFINITY,
            maximum: f64::NEG_INFINITY,
            sum: 0.0,
        }
    }

    pub fn observe(&mut self, value: f64) {
        self.count += 1;
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
        self.sum += value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Close the cell and compute its mean. An empty cell has a mean of 0.
    pub fn end(self) -> CellSummary {
        let mean = if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        };
        CellSummary {
            count: self.count,
            minimum: self.minimum,
            maximum: self.maximum,
            sum: self.sum,
            mean,
        }
    }
}

impl Default for CellAccumulator {
    fn default() -> Self {
        Self::begin()
    }
}

impl Extend<f64> for CellAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        for value in values {
            self.observe(value);
        }
    }
}

/// Final statistics of a closed cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    pub count: u64,
    pub minimum: f64,
    pub maximum: f64,
    pub sum: f64,
    pub mean: f64,
}

/// Closed cell summaries keyed by day, source and attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationSummary {
    days: BTreeMap<String, BTreeMap<String, BTreeMap<String, CellSummary>>>,
}

impl ValidationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the summary of a closed cell, replacing any previous entry.
    pub fn record(&mut self, cell: &Cell, summary: CellSummary) {
        self.days
            .entry(cell.day_key())
            .or_default()
            .entry(cell.source.clone())
            .or_default()
            .insert(cell.attribute.clone(), summary);
    }

    pub fn get(&self, day: &str, source: &str, attribute: &str) -> Option<&CellSummary> {
        self.days.get(day)?.get(source)?.get(attribute)
    }

    /// Fold in the cells of another summary, e.g. one built by a parallel worker.
    pub fn merge(&mut self, other: ValidationSummary) {
        for (day, sources) in other.days {
            let day_entry = self.days.entry(day).or_default();
            for (source, attributes) in sources {
                day_entry.entry(source).or_default().extend(attributes);
            }
        }
    }

    /// Number of cells recorded.
    pub fn cell_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|sources| sources.values())
            .map(|attributes| attributes.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterate `(day, source, attribute, summary)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, &CellSummary)> {
        self.days.iter().flat_map(|(day, sources)| {
            sources.iter().flat_map(move |(source, attributes)| {
                attributes.iter().map(move |(attribute, summary)| {
                    (day.as_str(), source.as_str(), attribute.as_str(), summary)
                })
            })
        })
    }

    pub fn to_json(&self) -> Result<String, SummaryError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SummaryError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SummaryError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
