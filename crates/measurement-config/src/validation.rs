//! Configuration validation
//!
//! Validates config consistency:
//! - At least one source
//! - Attributes are present and unique
//! - MongoDB names are non-empty
//! - The time line covers at least one day
//! - Value anchors are ordered and finite
//! - Value range and per-cell sums stay representable as `f64`

use crate::config::{Config, MongoConfig, TimeLine, ValueDistribution};
use crate::error::{ConfigError, Result};
use std::collections::HashSet;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.sources == 0 {
        return Err(ConfigError::invalid("sources", "must be greater than 0"));
    }
    validate_attributes(&config.attributes)?;
    validate_mongo(&config.mongo)?;
    validate_time_line(&config.time_line)?;
    validate_values(&config.values)?;
    validate_magnitude(&config.values, config.measurements_in_block)?;
    Ok(())
}

fn validate_attributes(attributes: &[String]) -> Result<()> {
    if attributes.is_empty() {
        return Err(ConfigError::invalid(
            "attributes",
            "at least one attribute is required",
        ));
    }

    let mut seen = HashSet::new();
    for attribute in attributes {
        if attribute.is_empty() {
            return Err(ConfigError::invalid("attributes", "names must be non-empty"));
        }
        if !seen.insert(attribute.as_str()) {
            return Err(ConfigError::DuplicateAttribute(attribute.clone()));
        }
    }
    Ok(())
}

fn validate_mongo(mongo: &MongoConfig) -> Result<()> {
    let fields = [
        ("mongo.uri", &mongo.uri),
        ("mongo.database", &mongo.database),
        ("mongo.input_collection", &mongo.input_collection),
        ("mongo.output_collection", &mongo.output_collection),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(field, "must be non-empty"));
        }
    }
    Ok(())
}

fn validate_time_line(time_line: &TimeLine) -> Result<()> {
    if time_line.from >= time_line.to {
        return Err(ConfigError::invalid(
            "time_line",
            format!(
                "'from' ({}) must be before 'to' ({})",
                time_line.from, time_line.to
            ),
        ));
    }
    Ok(())
}

fn validate_values(values: &ValueDistribution) -> Result<()> {
    let all = [
        values.minimum,
        values.q1,
        values.median,
        values.q3,
        values.maximum,
    ];
    if all.iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::invalid("values", "all anchors must be finite"));
    }

    let ordered = values.minimum < values.q1
        && values.q1 <= values.median
        && values.median <= values.q3
        && values.q3 < values.maximum;
    if !ordered {
        return Err(ConfigError::invalid(
            "values",
            format!(
                "expected minimum < q1 <= median <= q3 < maximum, got {} / {} / {} / {} / {}",
                values.minimum, values.q1, values.median, values.q3, values.maximum
            ),
        ));
    }
    Ok(())
}

/// Records per cell: three anchors plus four blocks.
fn measurements_per_cell(measurements_in_block: u32) -> u64 {
    3 + 4 * measurements_in_block as u64
}

fn validate_magnitude(values: &ValueDistribution, measurements_in_block: u32) -> Result<()> {
    if !(values.maximum - values.minimum).is_finite() {
        return Err(ConfigError::invalid(
            "values",
            format!(
                "range between minimum {} and maximum {} overflows",
                values.minimum, values.maximum
            ),
        ));
    }

    let largest = values.minimum.abs().max(values.maximum.abs());
    let cell_sum_bound = largest * measurements_per_cell(measurements_in_block) as f64;
    if !cell_sum_bound.is_finite() {
        return Err(ConfigError::invalid(
            "values",
            format!(
                "per-cell sum of {} values bounded by {} overflows",
                measurements_per_cell(measurements_in_block),
                largest
            ),
        ));
    }
    Ok(())
}
