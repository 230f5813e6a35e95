//! Random generation of correlated order/payment pairs.
//!
//! The generator owns a seeded RNG so runs with the same seed replay the
//! same sequence of ids, totals and items. Timestamps still track the
//! wall clock: `order_time` is the generation instant minus a random
//! offset of up to 24 hours, and `payment_time` trails it by up to five
//! minutes.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::records::{Order, OrderItem, Payment, PaymentMethod};

/// Menu the mock storefront sells from.
pub const MENU_ITEMS: [&str; 10] = [
    "Big Mac",
    "McChicken",
    "Quarter Pounder",
    "French Fries",
    "McFlurry",
    "Filet-O-Fish",
    "Chicken McNuggets",
    "Egg McMuffin",
    "Hash Browns",
    "Apple Pie",
];

/// How far into the past an order may be stamped, in milliseconds.
const MAX_ORDER_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Widest gap between an order and its payment, in milliseconds.
const MAX_PAYMENT_DELAY_MS: i64 = 5 * 60 * 1000;

/// Generates randomized orders and the payments that settle them.
pub struct MockDataGenerator {
    rng: StdRng,
}

impl MockDataGenerator {
    /// Create a generator, seeded for deterministic output when `seed` is
    /// given and drawing from OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Generate a randomized order stamped within the last 24 hours.
    pub fn next_order(&mut self) -> Order {
        self.order_at(Utc::now().timestamp_millis())
    }

    /// Generate the payment settling `order`.
    pub fn payment_for(&mut self, order: &Order) -> Payment {
        let method = PaymentMethod::ALL[self.rng.gen_range(0..PaymentMethod::ALL.len())];
        Payment {
            payment_id: self.next_uuid().to_string(),
            order_id: order.order_id.clone(),
            payment_amount: order.order_total,
            payment_method: method,
            payment_time: order.order_time + self.rng.gen_range(0..=MAX_PAYMENT_DELAY_MS),
        }
    }

    fn order_at(&mut self, now_ms: i64) -> Order {
        let order_id = self.next_uuid().to_string();
        let customer_id = format!("cust_{}", self.rng.gen_range(10_000..=99_999));
        let order_total = round2(self.rng.gen_range(10.0..=100.0));

        let item_count = self.rng.gen_range(1..=3);
        let order_items = (0..item_count).map(|_| self.next_item()).collect();

        Order {
            order_id,
            customer_id,
            order_total,
            order_items,
            order_time: now_ms - self.rng.gen_range(0..=MAX_ORDER_AGE_MS),
        }
    }

    fn next_item(&mut self) -> OrderItem {
        OrderItem {
            item_name: MENU_ITEMS[self.rng.gen_range(0..MENU_ITEMS.len())].to_string(),
            quantity: self.rng.gen_range(1..=5),
            price: round2(self.rng.gen_range(1.0..=10.0)),
        }
    }

    /// UUID v4 drawn from the generator's own RNG, so seeded runs stay
    /// deterministic.
    fn next_uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);

        bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
        bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

        Uuid::from_bytes(bytes)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
