//! Configuration model for the measurement loader.
//!
//! A run is described by a single YAML file with a top-level `configuration`
//! key. The file names the MongoDB target, the number of sources, the
//! attributes every source reports, the calendar range to cover and the value
//! distribution used to synthesize measurements.
//!
//! # Example
//!
//! ```rust
//! use measurement_config::Config;
//!
//! let config = Config::from_yaml(r#"
//! configuration:
//!   mongo:
//!     uri: mongodb://localhost:27017
//!     database: bigdata
//!     input_collection: measurements
//!     output_collection: statistics
//!   sources: 2
//!   attributes: [temperature, humidity]
//!   measurements_in_block: 10
//!   time_line:
//!     from: 2019-01-01
//!     to: 2019-01-06
//!   values:
//!     minimum: 0.0
//!     q1: 25.0
//!     median: 50.0
//!     q3: 75.0
//!     maximum: 100.0
//! "#).unwrap();
//!
//! assert_eq!(config.sources, 2);
//! assert_eq!(config.time_line.day_count(), 5);
//! ```

pub mod config;
pub mod error;
pub mod validation;

pub use config::{Config, MongoConfig, TimeLine, ValueDistribution};
pub use error::{ConfigError, Result};
pub use validation::validate_config;
