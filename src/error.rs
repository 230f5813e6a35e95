//! Error types for the mock data producer.

use thiserror::Error;

/// Errors raised while building clients, fetching schemas or publishing.
///
/// Everything except `Delivery` is fatal at startup; a `Delivery` error
/// covers a single record and the driver loop carries on past it.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Schema registry error: {0}")]
    SchemaRegistry(#[from] schema_registry_converter::error::SRCError),

    #[error("Avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    #[error("Topic creation error: {0}")]
    TopicCreation(String),

    #[error("Delivery failed for record {key}: {source}")]
    Delivery {
        key: String,
        source: rdkafka::error::KafkaError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
