//! End-to-end checks of the driver loop against a recording sink.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rdkafka::error::KafkaError;
use rdkafka::types::RDKafkaErrorCode;

use mock_data_producer::{
    DeliveryReport, MockDataGenerator, MockDataRunner, Order, Payment, ProducerError, RecordSink,
};

/// Sink that records every publish instead of talking to a broker.
#[derive(Default)]
struct RecordingSink {
    orders: Mutex<Vec<Order>>,
    payments: Mutex<Vec<Payment>>,
    fail_orders: bool,
}

impl RecordingSink {
    fn failing_orders() -> Self {
        Self {
            fail_orders: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RecordSink for RecordingSink {
    async fn publish_order(&self, order: &Order) -> Result<DeliveryReport, ProducerError> {
        let mut orders = self.orders.lock().unwrap();
        orders.push(order.clone());

        if self.fail_orders {
            return Err(ProducerError::Delivery {
                key: order.order_id.clone(),
                source: KafkaError::MessageProduction(RDKafkaErrorCode::MessageTimedOut),
            });
        }

        Ok(DeliveryReport {
            topic: "orders".to_string(),
            partition: 0,
            offset: orders.len() as i64 - 1,
        })
    }

    async fn publish_payment(&self, payment: &Payment) -> Result<DeliveryReport, ProducerError> {
        let mut payments = self.payments.lock().unwrap();
        payments.push(payment.clone());

        Ok(DeliveryReport {
            topic: "payments".to_string(),
            partition: 0,
            offset: payments.len() as i64 - 1,
        })
    }
}

#[tokio::test]
async fn test_single_iteration_publishes_one_correlated_pair() {
    let generator = MockDataGenerator::new(Some(42));
    let mut runner = MockDataRunner::new(generator, RecordingSink::default(), 1, Duration::ZERO);

    let metrics = runner.run().await.unwrap();
    let sink = runner.into_sink();

    let orders = sink.orders.into_inner().unwrap();
    let payments = sink.payments.into_inner().unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].order_id, orders[0].order_id);
    assert_eq!(payments[0].payment_amount, orders[0].order_total);

    assert_eq!(metrics.iterations, 1);
    assert_eq!(metrics.records_published, 2);
    assert_eq!(metrics.delivery_failures, 0);
}

#[tokio::test]
async fn test_order_delivery_failure_does_not_suppress_payment() {
    let generator = MockDataGenerator::new(Some(42));
    let mut runner = MockDataRunner::new(generator, RecordingSink::failing_orders(), 2, Duration::ZERO);

    let metrics = runner.run().await.unwrap();
    let sink = runner.into_sink();

    let orders = sink.orders.into_inner().unwrap();
    let payments = sink.payments.into_inner().unwrap();

    // Both iterations still published their payment after the failed order
    assert_eq!(orders.len(), 2);
    assert_eq!(payments.len(), 2);
    for (order, payment) in orders.iter().zip(payments.iter()) {
        assert_eq!(payment.order_id, order.order_id);
    }

    assert_eq!(metrics.iterations, 2);
    assert_eq!(metrics.records_published, 2);
    assert_eq!(metrics.delivery_failures, 2);
}

#[tokio::test]
async fn test_every_pair_keeps_its_invariants_across_a_run() {
    let generator = MockDataGenerator::new(Some(7));
    let mut runner = MockDataRunner::new(generator, RecordingSink::default(), 25, Duration::ZERO);

    runner.run().await.unwrap();
    let sink = runner.into_sink();

    let orders = sink.orders.into_inner().unwrap();
    let payments = sink.payments.into_inner().unwrap();
    assert_eq!(orders.len(), 25);
    assert_eq!(payments.len(), 25);

    for (order, payment) in orders.iter().zip(payments.iter()) {
        assert_eq!(payment.order_id, order.order_id);
        assert_eq!(payment.payment_amount, order.order_total);
        assert!(payment.payment_time >= order.order_time);
        assert!(payment.payment_time <= order.order_time + 5 * 60 * 1000);
    }
}
