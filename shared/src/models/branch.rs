//! Branch Model

use crate::validation::PHONE_RE;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Branch entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Branch {
    pub id: i64,
    /// Company reference
    pub company_id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub is_active: bool,
}

/// Create branch payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BranchCreate {
    #[validate(range(min = 1))]
    pub company_id: i64,
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(min = 5, max = 200))]
    pub address: String,
    #[validate(regex(path = *PHONE_RE))]
    pub phone: String,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Update branch payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BranchUpdate {
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[validate(length(min = 3, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 5, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(regex(path = *PHONE_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
