//! Company Model

use crate::validation::{PHONE_RE, TAX_ID_RE};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Company entity (legal owner of one or more branches)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: i64,
    pub name: String,
    /// RFC
    pub tax_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Create company payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyCreate {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(regex(path = *TAX_ID_RE))]
    pub tax_id: String,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Update company payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CompanyUpdate {
    #[validate(length(min = 3, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(regex(path = *TAX_ID_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
