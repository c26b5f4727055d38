//! Buy (purchase) Model
//!
//! A purchase registered against a branch, classified by expense concept
//! and paid with one payment method.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Buy entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Buy {
    pub id: i64,
    pub branch_id: i64,
    pub provider_id: i64,
    pub expense_concept_id: i64,
    pub payment_method_id: i64,
    pub description: String,
    pub amount: f64,
    /// Invoice / voucher reference
    pub reference: Option<String>,
    pub purchased_on: NaiveDate,
    pub is_active: bool,
}

/// Create buy payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BuyCreate {
    #[validate(range(min = 1))]
    pub branch_id: i64,
    #[validate(range(min = 1))]
    pub provider_id: i64,
    #[validate(range(min = 1))]
    pub expense_concept_id: i64,
    #[validate(range(min = 1))]
    pub payment_method_id: i64,
    #[validate(length(min = 3, max = 200))]
    pub description: String,
    #[validate(range(min = 0.01, max = 1_000_000.0))]
    pub amount: f64,
    #[validate(length(max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub purchased_on: NaiveDate,
}

/// Update buy payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BuyUpdate {
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<i64>,
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_concept_id: Option<i64>,
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<i64>,
    #[validate(length(min = 3, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0.01, max = 1_000_000.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[validate(length(max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_on: Option<NaiveDate>,
}
