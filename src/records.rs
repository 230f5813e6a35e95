//! Order and payment record types published to the broker.
//!
//! Field names and the `payment_method` symbol set mirror the registered
//! Avro schemas for the two subjects, so serde output maps onto the
//! fetched schema field-for-field.

use apache_avro::AvroSchema;
use serde::{Deserialize, Serialize};

/// A single line item on an order.
///
/// Item prices are independent of the order total; no arithmetic
/// consistency is enforced between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AvroSchema)]
#[avro(namespace = "com.mockdata")]
pub struct OrderItem {
    pub item_name: String,
    pub quantity: i32,
    pub price: f64,
}

/// A synthetic customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AvroSchema)]
#[avro(namespace = "com.mockdata")]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub order_total: f64,
    pub order_items: Vec<OrderItem>,
    /// Epoch milliseconds, within the 24 hours before generation.
    pub order_time: i64,
}

/// Payment methods accepted by the mock storefront.
///
/// Variant identifiers match the Avro enum symbols on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AvroSchema)]
#[allow(non_camel_case_types)]
pub enum PaymentMethod {
    credit_card,
    debit_card,
    cash,
    mobile_payment,
}

impl PaymentMethod {
    /// Every accepted method, for uniform selection.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::credit_card,
        PaymentMethod::debit_card,
        PaymentMethod::cash,
        PaymentMethod::mobile_payment,
    ];
}

/// The payment settling a single order.
///
/// `order_id` references the order generated in the same iteration and
/// `payment_amount` is an exact copy of that order's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AvroSchema)]
#[avro(namespace = "com.mockdata")]
pub struct Payment {
    pub payment_id: String,
    pub order_id: String,
    pub payment_amount: f64,
    pub payment_method: PaymentMethod,
    /// Epoch milliseconds, 0-5 minutes after the order's `order_time`.
    pub payment_time: i64,
}
