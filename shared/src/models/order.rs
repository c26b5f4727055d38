//! Order Model
//!
//! Orders as stored by the server, and the creation request produced by
//! [`crate::order::OrderDraft::to_request`].

use crate::order::{Discount, Fulfillment, OrderTotals};
use crate::validation::PHONE_RE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Forward-only workflow; cancellation allowed until delivery
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (InProgress, Ready)
                | (Ready, Delivered)
                | (Pending | InProgress | Ready, Cancelled)
        )
    }

    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Order line as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub line_total: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    /// Human-facing order number
    pub folio: String,
    pub branch_id: i64,
    pub employee_id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderLine>,
    pub discount: Option<Discount>,
    pub discount_authorized_by: Option<i64>,
    pub fulfillment: Fulfillment,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub delivery_price: f64,
    pub total: f64,
    pub advance: f64,
    pub remaining_balance: f64,
    pub payment_method_id: Option<i64>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Order line of a creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct OrderLineRequest {
    #[validate(range(min = 1))]
    pub product_id: i64,
    #[validate(range(min = 1, max = 9999))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
    /// Reservation that holds the units of this line
    #[validate(length(min = 1))]
    pub reservation_id: String,
}

/// Advance payment of a creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvanceRequest {
    pub payment_method_id: i64,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tendered: Option<f64>,
    pub change: f64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct CreateOrderRequest {
    /// Idempotency key of the draft
    pub client_reference: Uuid,
    #[validate(range(min = 1))]
    pub branch_id: i64,
    pub employee_id: i64,
    #[validate(length(min = 3, max = 100))]
    pub customer_name: String,
    #[validate(regex(path = *PHONE_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[validate(nested)]
    pub items: Vec<OrderLineRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_authorized_by: Option<i64>,
    pub fulfillment: Fulfillment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance: Option<AdvanceRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_register_id: Option<i64>,
    pub totals: OrderTotals,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Cancellation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CancelOrderRequest {
    #[validate(length(min = 3, max = 200))]
    pub reason: String,
}
