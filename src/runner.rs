//! The driver loop: generate, publish, wait, sleep, repeat.
//!
//! Each iteration generates one order, publishes it and waits for the
//! delivery report, then does the same for the correlated payment before
//! sleeping out the configured interval. A delivery failure on either
//! record is counted and logged by the publisher, and the loop moves on;
//! any other error (schema mismatch, client teardown) aborts the run.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::ProducerError;
use crate::generator::MockDataGenerator;
use crate::publisher::{DeliveryReport, RecordSink};

/// Outcome counters for a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Iterations completed (each one covers an order and a payment).
    pub iterations: u64,
    /// Records acknowledged by the broker.
    pub records_published: u64,
    /// Records dropped after a failed delivery.
    pub delivery_failures: u64,
    /// Wall-clock time for the whole run, including sleeps.
    pub total_duration: Duration,
}

impl RunMetrics {
    /// Acknowledged records per second over the whole run.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_published as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Drives the generate → publish → wait cycle for a bounded number of
/// iterations with a fixed delay between them.
pub struct MockDataRunner<S> {
    generator: MockDataGenerator,
    sink: S,
    iterations: u64,
    interval: Duration,
}

impl<S: RecordSink> MockDataRunner<S> {
    pub fn new(
        generator: MockDataGenerator,
        sink: S,
        iterations: u64,
        interval: Duration,
    ) -> Self {
        Self {
            generator,
            sink,
            iterations,
            interval,
        }
    }

    /// Run the full cycle and return its counters.
    pub async fn run(&mut self) -> Result<RunMetrics, ProducerError> {
        let start = Instant::now();
        let mut metrics = RunMetrics::default();

        info!(
            "Publishing {} order/payment pairs ({}ms between iterations)",
            self.iterations,
            self.interval.as_millis()
        );

        for iteration in 0..self.iterations {
            let order = self.generator.next_order();
            Self::track(&mut metrics, self.sink.publish_order(&order).await)?;

            let payment = self.generator.payment_for(&order);
            Self::track(&mut metrics, self.sink.publish_payment(&payment).await)?;

            metrics.iterations = iteration + 1;
            debug!("Iteration {} of {} complete", iteration + 1, self.iterations);

            tokio::time::sleep(self.interval).await;
        }

        metrics.total_duration = start.elapsed();
        info!(
            "Run complete: {} records acknowledged, {} delivery failures, {:?} ({:.2} rec/sec)",
            metrics.records_published,
            metrics.delivery_failures,
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(metrics)
    }

    /// Give the sink back, for flushing after the run.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Count one publish outcome; only delivery failures are survivable.
    fn track(
        metrics: &mut RunMetrics,
        outcome: Result<DeliveryReport, ProducerError>,
    ) -> Result<(), ProducerError> {
        match outcome {
            Ok(_) => {
                metrics.records_published += 1;
                Ok(())
            }
            Err(ProducerError::Delivery { .. }) => {
                metrics.delivery_failures += 1;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
