//! Product Model

use crate::validation::SKU_RE;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    /// Unit price
    pub price: f64,
    pub brand_id: Option<i64>,
    pub department_id: Option<i64>,
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(regex(path = *SKU_RE))]
    pub sku: String,
    #[validate(length(min = 2, max = 120))]
    pub name: String,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(regex(path = *SKU_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[validate(length(min = 2, max = 120))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
}
