//! CLI argument definitions and client configuration assembly.

use clap::Parser;
use rdkafka::ClientConfig;
use schema_registry_converter::async_impl::schema_registry::SrSettings;

use crate::error::ProducerError;

/// Publish randomly generated order/payment pairs to Kafka.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ProducerArgs {
    /// Kafka brokers (comma-separated, e.g., "localhost:9092")
    #[arg(long, env = "KAFKA_BROKERS", default_value = "localhost:9092")]
    pub brokers: String,

    /// SASL username; enables SASL together with --sasl-password
    #[arg(long, env = "KAFKA_SASL_USERNAME")]
    pub sasl_username: Option<String>,

    /// SASL password
    #[arg(long, env = "KAFKA_SASL_PASSWORD", hide_env_values = true)]
    pub sasl_password: Option<String>,

    /// SASL mechanism applied when credentials are set
    #[arg(long, default_value = "PLAIN")]
    pub sasl_mechanism: String,

    /// Security protocol applied when credentials are set
    #[arg(long, default_value = "SASL_SSL")]
    pub security_protocol: String,

    /// Schema registry URL
    #[arg(
        long,
        env = "SCHEMA_REGISTRY_URL",
        default_value = "http://localhost:8081"
    )]
    pub schema_registry: String,

    /// Schema registry basic auth as "user:password"
    #[arg(long, env = "SCHEMA_REGISTRY_AUTH", hide_env_values = true)]
    pub registry_auth: Option<String>,

    /// Topic receiving order records
    #[arg(long, default_value = "orders")]
    pub orders_topic: String,

    /// Topic receiving payment records
    #[arg(long, default_value = "payments")]
    pub payments_topic: String,

    /// Number of order/payment pairs to publish
    #[arg(long, default_value = "500")]
    pub count: u64,

    /// Delay between iterations in milliseconds
    #[arg(long, default_value = "2000")]
    pub interval_ms: u64,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Create the topics before publishing if they don't exist
    #[arg(long)]
    pub create_topics: bool,
}

impl ProducerArgs {
    /// Kafka client settings shared by the producers and the admin client.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.brokers)
            .set("message.timeout.ms", "30000");

        if let (Some(username), Some(password)) = (&self.sasl_username, &self.sasl_password) {
            config
                .set("security.protocol", &self.security_protocol)
                .set("sasl.mechanisms", &self.sasl_mechanism)
                .set("sasl.username", username)
                .set("sasl.password", password);
        }

        config
    }

    /// Schema registry connection settings.
    pub fn sr_settings(&self) -> Result<SrSettings, ProducerError> {
        match &self.registry_auth {
            None => Ok(SrSettings::new(self.schema_registry.clone())),
            Some(auth) => {
                let (username, password) = auth.split_once(':').ok_or_else(|| {
                    ProducerError::Config("--registry-auth must be \"user:password\"".to_string())
                })?;
                let settings = SrSettings::new_builder(self.schema_registry.clone())
                    .set_basic_authorization(username, Some(password))
                    .build()?;
                Ok(settings)
            }
        }
    }
}
