//! Batched INSERT and collection maintenance for MongoDB.

use crate::error::MongoDBSinkError;
use bson::{doc, Document};
use measurement_generator::Measurement;
use mongodb::{Collection, IndexModel};

/// Insert a batch of measurements into a MongoDB collection.
pub async fn insert_batch(
    collection: &Collection<Document>,
    measurements: &[Measurement],
) -> Result<u64, MongoDBSinkError> {
    if measurements.is_empty() {
        return Ok(0);
    }

    let documents: Vec<Document> = measurements.iter().map(measurement_to_document).collect();
    let result = collection.insert_many(documents).await?;

    Ok(result.inserted_ids.len() as u64)
}

/// Convert a measurement to a BSON document.
///
/// The timestamp becomes a BSON date, which keeps millisecond precision.
pub fn measurement_to_document(measurement: &Measurement) -> Document {
    doc! {
        "source": measurement.source.as_str(),
        "attribute": measurement.attribute.as_str(),
        "timestamp": bson::DateTime::from_chrono(measurement.timestamp),
        "value": measurement.value,
    }
}

/// Indexes needed by downstream queries: `timestamp` alone and
/// `(source, timestamp, attribute)` ascending.
pub fn measurement_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder().keys(doc! { "timestamp": 1 }).build(),
        IndexModel::builder()
            .keys(doc! { "source": 1, "timestamp": 1, "attribute": 1 })
            .build(),
    ]
}

/// Create the measurement indexes on a collection.
pub async fn create_indexes(collection: &Collection<Document>) -> Result<(), MongoDBSinkError> {
    collection.create_indexes(measurement_indexes()).await?;
    Ok(())
}

/// Drop a collection if it exists.
pub async fn drop_collection(collection: &Collection<Document>) -> Result<(), MongoDBSinkError> {
    collection.drop().await?;
    Ok(())
}

/// Get the document count for a collection.
pub async fn count_documents(collection: &Collection<Document>) -> Result<u64, MongoDBSinkError> {
    let count = collection.count_documents(doc! {}).await?;
    Ok(count)
}
