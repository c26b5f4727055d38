//! Department Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Department entity (product grouping inside a branch)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    pub id: i64,
    /// Branch reference
    pub branch_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentCreate {
    #[validate(range(min = 1))]
    pub branch_id: i64,
    #[validate(length(min = 3, max = 60))]
    pub name: String,
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Update department payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[validate(length(min = 3, max = 60))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
