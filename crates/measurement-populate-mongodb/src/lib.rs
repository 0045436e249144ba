//! MongoDB sink for the measurement loader.
//!
//! Measurements are stored as plain documents
//! `{source, attribute, timestamp, value}` in the configured input collection,
//! which is indexed on `timestamp` and on `(source, timestamp, attribute)`.

pub mod args;
pub mod error;
pub mod insert;
pub mod sink;

pub use args::MongoDBPopulateArgs;
pub use error::MongoDBSinkError;
pub use sink::MongoDBSink;
