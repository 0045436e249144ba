//! Measurement records and the cells they belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the `index`-th data source (1-based), e.g. `/data_sources/00001`.
pub fn source_name(index: u32) -> String {
    format!("/data_sources/{index:05}")
}

/// A single time-stamped sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub source: String,
    pub attribute: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// One (day, source, attribute) unit of generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    /// UTC midnight of the day
    pub day: DateTime<Utc>,
    pub source: String,
    pub attribute: String,
}

impl Cell {
    pub fn new(day: DateTime<Utc>, source: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            day,
            source: source.into(),
            attribute: attribute.into(),
        }
    }

    /// Calendar date of the cell as `YYYY-MM-DD`.
    pub fn day_key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }

    /// Build a record for this cell.
    pub fn measurement(&self, timestamp: DateTime<Utc>, value: f64) -> Measurement {
        Measurement {
            source: self.source.clone(),
            attribute: self.attribute.clone(),
            timestamp,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_source_name_padding() {
        assert_eq!(source_name(1), "/data_sources/00001");
        assert_eq!(source_name(42), "/data_sources/00042");
        assert_eq!(source_name(123456), "/data_sources/123456");
    }

    #[test]
    fn test_day_key() {
        let day = Utc.with_ymd_and_hms(2019, 3, 7, 0, 0, 0).unwrap();
        let cell = Cell::new(day, source_name(1), "humidity");
        assert_eq!(cell.day_key(), "2019-03-07");
    }

    #[test]
    fn test_measurement_carries_cell_identity() {
        let day = Utc.with_ymd_and_hms(2019, 3, 7, 0, 0, 0).unwrap();
        let cell = Cell::new(day, source_name(2), "humidity");
        let record = cell.measurement(day, 12.5);

        assert_eq!(record.source, "/data_sources/00002");
        assert_eq!(record.attribute, "humidity");
        assert_eq!(record.timestamp, day);
        assert_eq!(record.value, 12.5);
    }
}
