//! Registry-backed Avro encoding in the Confluent wire format.
//!
//! The schema registry owns the schemas; this module only fetches the
//! latest version for a subject, parses it, and renders records as
//! magic byte + big-endian schema id + Avro datum.

use apache_avro::{to_avro_datum, to_value, Schema};
use schema_registry_converter::async_impl::schema_registry::{get_schema_by_subject, SrSettings};
use schema_registry_converter::schema_registry_common::{get_payload, SubjectNameStrategy};
use serde::Serialize;
use tracing::info;

use crate::error::ProducerError;

/// Encodes records against one subject's registered schema.
pub struct SubjectEncoder {
    subject: String,
    schema: Schema,
    schema_id: u32,
}

impl SubjectEncoder {
    /// Fetch the latest schema for the `<topic>-value` subject and bind an
    /// encoder to it.
    pub async fn from_registry(
        sr_settings: &SrSettings,
        topic: &str,
    ) -> Result<Self, ProducerError> {
        let strategy = SubjectNameStrategy::TopicNameStrategy(topic.to_string(), false);
        let registered = get_schema_by_subject(sr_settings, &strategy).await?;
        let schema = Schema::parse_str(&registered.schema)?;

        let subject = format!("{topic}-value");
        info!("Fetched schema id {} for subject '{subject}'", registered.id);

        Ok(Self {
            subject,
            schema,
            schema_id: registered.id,
        })
    }

    /// Bind an encoder to a supplied schema, bypassing the registry.
    pub fn from_schema(subject: &str, schema_id: u32, schema: Schema) -> Self {
        Self {
            subject: subject.to_string(),
            schema,
            schema_id,
        }
    }

    /// Serialize one record to Confluent wire format.
    pub fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, ProducerError> {
        let value = to_value(record)?;
        let datum = to_avro_datum(&self.schema, value)?;
        Ok(get_payload(self.schema_id, datum))
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_id(&self) -> u32 {
        self.schema_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockDataGenerator;
    use crate::records::{Order, Payment};
    use apache_avro::{from_avro_datum, from_value, AvroSchema};

    fn order_encoder() -> SubjectEncoder {
        SubjectEncoder::from_schema("orders-value", 7, Order::get_schema())
    }

    fn payment_encoder() -> SubjectEncoder {
        SubjectEncoder::from_schema("payments-value", 8, Payment::get_schema())
    }

    #[test]
    fn test_confluent_wire_format_header() {
        let mut generator = MockDataGenerator::new(Some(42));
        let order = generator.next_order();

        let payload = order_encoder().encode(&order).unwrap();

        assert_eq!(payload[0], 0x00);
        assert_eq!(payload[1..5], 7u32.to_be_bytes());
        assert!(payload.len() > 5);
    }

    #[test]
    fn test_order_round_trip() {
        let mut generator = MockDataGenerator::new(Some(42));
        let order = generator.next_order();

        let encoder = order_encoder();
        let payload = encoder.encode(&order).unwrap();

        let value = from_avro_datum(encoder.schema(), &mut &payload[5..], None).unwrap();
        let decoded: Order = from_value(&value).unwrap();

        assert_eq!(decoded, order);
    }

    #[test]
    fn test_payment_round_trip() {
        let mut generator = MockDataGenerator::new(Some(42));
        let order = generator.next_order();
        let payment = generator.payment_for(&order);

        let encoder = payment_encoder();
        let payload = encoder.encode(&payment).unwrap();

        let value = from_avro_datum(encoder.schema(), &mut &payload[5..], None).unwrap();
        let decoded: Payment = from_value(&value).unwrap();

        assert_eq!(decoded, payment);
    }

    #[test]
    fn test_encode_rejects_mismatched_record() {
        // A payment cannot encode against the orders schema
        let mut generator = MockDataGenerator::new(Some(42));
        let order = generator.next_order();
        let payment = generator.payment_for(&order);

        assert!(order_encoder().encode(&payment).is_err());
    }
}
