//! Mock order/payment data producer for Kafka.
//!
//! Generates randomized order records and the payments that settle them,
//! serializes both against Avro schemas fetched from a Confluent schema
//! registry, and publishes them to two Kafka topics as synthetic test
//! traffic for streaming pipelines.
//!
//! # Architecture
//!
//! ```text
//! MockDataGenerator
//!        │
//!        │ Order / Payment
//!        ▼
//! ┌─────────────────┐             ┌──────────────────────────────┐
//! │ MockDataRunner  │   publish   │        KafkaPublisher        │
//! │                 │ ──────────▶ │                              │
//! │ - bounded loop  │             │  orders channel  payments    │
//! │ - fixed delay   │             │       │          channel     │
//! │ - metrics       │             │       │             │        │
//! └─────────────────┘             │ SubjectEncoder  SubjectEncoder
//!                                 │ (orders-value)  (payments-value)
//!                                 └───────┼─────────────┼────────┘
//!                                         ▼             ▼
//!                                      Kafka broker (Avro,
//!                                   Confluent wire format)
//! ```
//!
//! Each iteration publishes one order and one correlated payment, awaiting
//! each delivery report before moving on. A failed delivery is logged and
//! dropped; the loop is best-effort and never halts on a single record.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use mock_data_producer::{MockDataGenerator, MockDataRunner, RecordSink};
//!
//! async fn run<S: RecordSink>(sink: S) -> anyhow::Result<()> {
//!     let generator = MockDataGenerator::new(Some(42));
//!     let mut runner =
//!         MockDataRunner::new(generator, sink, 500, Duration::from_millis(2000));
//!     let metrics = runner.run().await?;
//!     println!("published {} records", metrics.records_published);
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod publisher;
pub mod records;
pub mod runner;

// Re-exports for convenience
pub use args::ProducerArgs;
pub use encoder::SubjectEncoder;
pub use error::ProducerError;
pub use generator::{MockDataGenerator, MENU_ITEMS};
pub use publisher::{ensure_topics, DeliveryReport, KafkaPublisher, RecordSink, TopicChannel};
pub use records::{Order, OrderItem, Payment, PaymentMethod};
pub use runner::{MockDataRunner, RunMetrics};
