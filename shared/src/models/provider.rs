//! Provider Model

use crate::validation::{PHONE_RE, TAX_ID_RE};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Provider (supplier) entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub tax_id: Option<String>,
    pub contact_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub is_active: bool,
}

/// Create provider payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderCreate {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(regex(path = *TAX_ID_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[validate(length(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[validate(regex(path = *PHONE_RE))]
    pub phone: String,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Update provider payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProviderUpdate {
    #[validate(length(min = 3, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(regex(path = *TAX_ID_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[validate(length(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[validate(regex(path = *PHONE_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
