//! MongoDB implementation of [`MeasurementSink`].

use crate::error::MongoDBSinkError;
use crate::insert::{count_documents, create_indexes, drop_collection, insert_batch};
use async_trait::async_trait;
use bson::Document;
use measurement_config::MongoConfig;
use measurement_generator::Measurement;
use measurement_populate::{MeasurementSink, PopulateError};
use mongodb::{Client, Collection, Database};
use tracing::info;

/// Sink writing measurements to a MongoDB collection.
///
/// Clones share the driver's connection pool, so parallel workers can each
/// hold a handle.
#[derive(Clone)]
pub struct MongoDBSink {
    client: Client,
    database: Database,
    input_collection: String,
    output_collection: String,
}

impl MongoDBSink {
    /// Connect to MongoDB.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = Config::from_file("config.yaml")?;
    /// let sink = MongoDBSink::connect(&config.mongo).await?;
    /// ```
    pub async fn connect(config: &MongoConfig) -> Result<Self, MongoDBSinkError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);

        // Test connection
        database.list_collection_names().await?;

        Ok(Self::with_client(client, config))
    }

    /// Create a sink from an existing client.
    pub fn with_client(client: Client, config: &MongoConfig) -> Self {
        let database = client.database(&config.database);
        Self {
            client,
            database,
            input_collection: config.input_collection.clone(),
            output_collection: config.output_collection.clone(),
        }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    fn input(&self) -> Collection<Document> {
        self.collection(&self.input_collection)
    }
}

#[async_trait]
impl MeasurementSink for MongoDBSink {
    async fn prepare(&self) -> Result<(), PopulateError> {
        info!(
            "Dropping collections '{}' and '{}' in database '{}'",
            self.input_collection,
            self.output_collection,
            self.database.name()
        );
        drop_collection(&self.input()).await?;
        drop_collection(&self.collection(&self.output_collection)).await?;

        info!("Creating indexes on '{}'", self.input_collection);
        create_indexes(&self.input()).await?;
        Ok(())
    }

    async fn insert_batch(&self, batch: &[Measurement]) -> Result<u64, PopulateError> {
        Ok(insert_batch(&self.input(), batch).await?)
    }

    async fn count_documents(&self) -> Result<u64, PopulateError> {
        Ok(count_documents(&self.input()).await?)
    }

    async fn close(&self) -> Result<(), PopulateError> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}
