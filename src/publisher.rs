//! Kafka publishing: the sink seam, per-topic channels and topic admin.
//!
//! `KafkaPublisher` owns the two long-lived output channels (orders and
//! payments). Each channel pairs a producer client with the encoder bound
//! to its topic's subject, so a record handed to the publisher comes out
//! the other side as a keyed, schema-validated Kafka message.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::ClientConfig;
use tracing::{info, warn};

use crate::encoder::SubjectEncoder;
use crate::error::ProducerError;
use crate::records::{Order, Payment};

/// Where a delivered record landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// Destination for generated records.
///
/// The Kafka-backed implementation is [`KafkaPublisher`]; tests substitute
/// recording stubs.
#[async_trait]
pub trait RecordSink {
    /// Publish an order keyed by its own id and wait for the delivery
    /// outcome.
    async fn publish_order(&self, order: &Order) -> Result<DeliveryReport, ProducerError>;

    /// Publish a payment keyed by its own id and wait for the delivery
    /// outcome.
    async fn publish_payment(&self, payment: &Payment) -> Result<DeliveryReport, ProducerError>;
}

/// One topic's producer client plus the encoder bound to its subject.
pub struct TopicChannel {
    producer: FutureProducer,
    topic: String,
    encoder: SubjectEncoder,
}

impl TopicChannel {
    pub fn new(
        config: &ClientConfig,
        topic: String,
        encoder: SubjectEncoder,
    ) -> Result<Self, ProducerError> {
        let producer: FutureProducer = config.create()?;
        Ok(Self {
            producer,
            topic,
            encoder,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Encode and publish one record, then wait for its delivery report.
    ///
    /// Both outcomes emit a status line. A failed delivery is dropped,
    /// never retried.
    async fn publish<T: serde::Serialize + Sync>(
        &self,
        key: &str,
        record: &T,
    ) -> Result<DeliveryReport, ProducerError> {
        let payload = self.encoder.encode(record)?;
        let future_record = FutureRecord::to(&self.topic).key(key).payload(&payload);

        match self.producer.send(future_record, Duration::from_secs(30)).await {
            Ok((partition, offset)) => {
                info!(
                    "Record {key} delivered to {} [{partition}] at offset {offset}",
                    self.topic
                );
                Ok(DeliveryReport {
                    topic: self.topic.clone(),
                    partition,
                    offset,
                })
            }
            Err((err, _)) => {
                warn!("Delivery failed for record {key}: {err}");
                Err(ProducerError::Delivery {
                    key: key.to_string(),
                    source: err,
                })
            }
        }
    }

    /// Block until every queued delivery for this client has resolved.
    pub fn flush(&self, timeout: Duration) -> Result<(), ProducerError> {
        self.producer.flush(timeout)?;
        Ok(())
    }
}

/// The two long-lived output channels of the producer.
pub struct KafkaPublisher {
    orders: TopicChannel,
    payments: TopicChannel,
}

impl KafkaPublisher {
    pub fn new(orders: TopicChannel, payments: TopicChannel) -> Self {
        Self { orders, payments }
    }

    /// Flush both underlying clients at process end.
    pub fn flush(&self, timeout: Duration) -> Result<(), ProducerError> {
        self.orders.flush(timeout)?;
        self.payments.flush(timeout)
    }
}

#[async_trait]
impl RecordSink for KafkaPublisher {
    async fn publish_order(&self, order: &Order) -> Result<DeliveryReport, ProducerError> {
        self.orders.publish(&order.order_id, order).await
    }

    async fn publish_payment(&self, payment: &Payment) -> Result<DeliveryReport, ProducerError> {
        self.payments.publish(&payment.payment_id, payment).await
    }
}

/// Create `topics` if they don't exist, tolerating ones that already do.
pub async fn ensure_topics(config: &ClientConfig, topics: &[&str]) -> Result<(), ProducerError> {
    let admin_client: AdminClient<DefaultClientContext> = config.create()?;

    let new_topics: Vec<NewTopic> = topics
        .iter()
        .map(|topic| NewTopic::new(topic, 3, TopicReplication::Fixed(1)))
        .collect();
    let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(10)));

    match admin_client.create_topics(&new_topics, &opts).await {
        Ok(results) => {
            for result in results {
                match result {
                    Ok(topic_name) => {
                        info!("Topic '{topic_name}' created");
                    }
                    Err((topic_name, err)) => {
                        let err_str = err.to_string();
                        if err_str.contains("already exists")
                            || err_str.contains("TopicExistsException")
                        {
                            info!("Topic '{topic_name}' already exists");
                        } else {
                            return Err(ProducerError::TopicCreation(format!(
                                "Failed to create topic {topic_name}: {err}"
                            )));
                        }
                    }
                }
            }
            Ok(())
        }
        Err(e) => Err(ProducerError::TopicCreation(format!(
            "Failed to create topics: {e}"
        ))),
    }
}
