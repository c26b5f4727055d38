//! Expense Concept Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Expense concept entity (classifies purchases)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseConcept {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create expense concept payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseConceptCreate {
    #[validate(length(min = 3, max = 80))]
    pub name: String,
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Update expense concept payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ExpenseConceptUpdate {
    #[validate(length(min = 3, max = 80))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
