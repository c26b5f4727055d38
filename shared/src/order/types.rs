//! Shared types for the order draft

use crate::models::{CashRegister, PaymentMethod, Product, Role, StockReservation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Operator
// ============================================================================

/// Employee composing the order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operator {
    pub employee_id: i64,
    pub name: String,
    pub role: Role,
    /// Home branch
    pub branch_id: i64,
}

// ============================================================================
// Items
// ============================================================================

/// Draft line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftItem {
    pub product_id: i64,
    pub sku: String,
    pub name: String,
    /// Unit price captured when the product was added
    pub unit_price: f64,
    pub quantity: i32,
    /// Server-side hold for this line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<StockReservation>,
}

impl DraftItem {
    pub fn from_product(product: &Product, quantity: i32) -> Self {
        Self {
            product_id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            reservation: None,
        }
    }

    /// Line total (unit_price * quantity), rounded
    pub fn line_total(&self) -> f64 {
        use super::money::{to_decimal, to_f64};
        to_f64(to_decimal(self.unit_price) * rust_decimal::Decimal::from(self.quantity))
    }

    /// Units held by the line's reservation
    pub fn reserved_quantity(&self) -> i32 {
        self.reservation.as_ref().map(|r| r.quantity).unwrap_or(0)
    }

    pub fn is_fully_reserved(&self) -> bool {
        self.reserved_quantity() >= self.quantity
    }
}

// ============================================================================
// Discount
// ============================================================================

/// Order-level discount, applied to the item subtotal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal (0, 100]
    Percentage(f64),
    /// Fixed amount, capped at the subtotal
    Fixed(f64),
}

/// Who approved a discount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountAuthorization {
    pub authorizer_id: i64,
    pub authorizer_name: String,
}

// ============================================================================
// Fulfillment
// ============================================================================

/// How the order reaches the customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fulfillment {
    /// Customer picks up at the branch
    #[default]
    Pickup,
    /// Delivered to an address for a fee
    Delivery { address: String, price: f64 },
}

impl Fulfillment {
    pub fn price(&self) -> f64 {
        match self {
            Fulfillment::Pickup => 0.0,
            Fulfillment::Delivery { price, .. } => *price,
        }
    }

    pub fn is_delivery(&self) -> bool {
        matches!(self, Fulfillment::Delivery { .. })
    }
}

// ============================================================================
// Advance payment
// ============================================================================

/// Amount paid up front when the order is created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvancePayment {
    pub payment_method_id: i64,
    /// Cash goes through the register and may produce change
    pub cash: bool,
    pub amount: f64,
    /// Cash handed over by the customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tendered: Option<f64>,
}

impl AdvancePayment {
    pub fn new(method: &PaymentMethod, amount: f64, tendered: Option<f64>) -> Self {
        Self {
            payment_method_id: method.id,
            cash: method.is_cash(),
            amount,
            tendered,
        }
    }
}

// ============================================================================
// Cash register
// ============================================================================

/// Register state as seen by the draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CashRegisterState {
    #[default]
    Closed,
    Open {
        register_id: i64,
        opened_at: DateTime<Utc>,
    },
}

impl CashRegisterState {
    pub fn is_open(&self) -> bool {
        matches!(self, CashRegisterState::Open { .. })
    }

    pub fn register_id(&self) -> Option<i64> {
        match self {
            CashRegisterState::Open { register_id, .. } => Some(*register_id),
            CashRegisterState::Closed => None,
        }
    }
}

impl From<Option<&CashRegister>> for CashRegisterState {
    fn from(register: Option<&CashRegister>) -> Self {
        match register {
            Some(r) if r.is_open() => CashRegisterState::Open {
                register_id: r.id,
                opened_at: r.opened_at,
            },
            _ => CashRegisterState::Closed,
        }
    }
}

// ============================================================================
// Totals
// ============================================================================

/// Derived amounts of a draft
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderTotals {
    /// Sum of line totals
    pub subtotal: f64,
    pub discount_amount: f64,
    pub delivery_price: f64,
    /// subtotal - discount + delivery
    pub total: f64,
    pub advance: f64,
    /// total - advance
    pub remaining_balance: f64,
    /// Cash to hand back (tendered - advance)
    pub change: f64,
}
