//! Brand Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Brand entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

/// Create brand payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrandCreate {
    #[validate(length(min = 2, max = 60))]
    pub name: String,
}

/// Update brand payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BrandUpdate {
    #[validate(length(min = 2, max = 60))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
