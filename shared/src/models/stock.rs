//! Stock Model
//!
//! Availability per branch and product, and the reservations that hold
//! units for an order draft until it is submitted or cancelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Units available for sale at a branch (already net of reservations)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockLevel {
    pub branch_id: i64,
    pub product_id: i64,
    pub available: i32,
}

/// Server-side hold on stock units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockReservation {
    pub id: String,
    pub branch_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Reserve request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveStockRequest {
    pub branch_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

/// Set the held quantity of an existing reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustReservationRequest {
    pub quantity: i32,
}
