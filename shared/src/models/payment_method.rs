//! Payment Method Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How a payment method settles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Cash into the register drawer
    #[default]
    Cash,
    Card,
    Transfer,
    Other,
}

/// Payment method entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub kind: PaymentKind,
    /// Whether a voucher/transfer reference must be captured
    pub requires_reference: bool,
    pub is_active: bool,
}

impl PaymentMethod {
    /// Cash payments go through the open cash register and may produce change
    pub fn is_cash(&self) -> bool {
        self.kind == PaymentKind::Cash
    }
}

/// Create payment method payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentMethodCreate {
    #[validate(length(min = 3, max = 50))]
    pub name: String,
    pub kind: PaymentKind,
    #[serde(default)]
    pub requires_reference: bool,
}

/// Update payment method payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PaymentMethodUpdate {
    #[validate(length(min = 3, max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PaymentKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_reference: Option<bool>,
}
