//! Employee Model

use crate::validation::PHONE_RE;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Cashier,
}

impl Role {
    /// Admins and managers may grant discounts on their own
    pub fn can_authorize_discounts(self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    /// Only admins work across branches
    pub fn can_pick_branch(self) -> bool {
        self == Role::Admin
    }
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(range(min = 1))]
    pub branch_id: i64,
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *PHONE_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    #[validate(length(min = 3, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}
