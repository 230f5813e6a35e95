//! Command-line entry point for the mock data producer.
//!
//! Running with no flags publishes 500 order/payment pairs to the
//! `orders` and `payments` topics on a local broker, two seconds apart,
//! using the latest registered schema for each topic's value subject:
//!
//! ```bash
//! mock-data-producer
//! ```
//!
//! Against a SASL-secured cluster and authenticated registry:
//!
//! ```bash
//! KAFKA_SASL_USERNAME=svc KAFKA_SASL_PASSWORD=... \
//! SCHEMA_REGISTRY_AUTH=sr-user:... \
//! mock-data-producer \
//!   --brokers broker-1:9092,broker-2:9092 \
//!   --schema-registry https://registry.example.com
//! ```
//!
//! Startup failures (unreachable broker, unknown subject, bad schema) are
//! fatal; delivery failures for individual records are logged and skipped.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mock_data_producer::args::ProducerArgs;
use mock_data_producer::encoder::SubjectEncoder;
use mock_data_producer::generator::MockDataGenerator;
use mock_data_producer::publisher::{ensure_topics, KafkaPublisher, TopicChannel};
use mock_data_producer::runner::MockDataRunner;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ProducerArgs::parse();

    match run_main(args).await {
        Ok(()) => println!("Mock data successfully published"),
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main(args: ProducerArgs) -> anyhow::Result<()> {
    let client_config = args.client_config();

    if args.create_topics {
        ensure_topics(
            &client_config,
            &[args.orders_topic.as_str(), args.payments_topic.as_str()],
        )
        .await?;
    }

    let sr_settings = args.sr_settings()?;
    let orders_encoder = SubjectEncoder::from_registry(&sr_settings, &args.orders_topic).await?;
    let payments_encoder =
        SubjectEncoder::from_registry(&sr_settings, &args.payments_topic).await?;

    let publisher = KafkaPublisher::new(
        TopicChannel::new(&client_config, args.orders_topic.clone(), orders_encoder)?,
        TopicChannel::new(&client_config, args.payments_topic.clone(), payments_encoder)?,
    );

    let generator = MockDataGenerator::new(args.seed);
    let mut runner = MockDataRunner::new(
        generator,
        publisher,
        args.count,
        Duration::from_millis(args.interval_ms),
    );

    runner.run().await?;

    // Drain anything rdkafka still has queued before exiting
    runner.into_sink().flush(Duration::from_secs(10))?;

    Ok(())
}
