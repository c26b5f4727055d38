//! Cash Register Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Register session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CashRegisterStatus {
    Open,
    #[default]
    Closed,
}

/// Cash register session of a branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashRegister {
    pub id: i64,
    pub branch_id: i64,
    /// Employee who opened the session
    pub opened_by: i64,
    pub opened_at: DateTime<Utc>,
    pub opening_amount: f64,
    pub status: CashRegisterStatus,
    pub closed_at: Option<DateTime<Utc>>,
}

impl CashRegister {
    pub fn is_open(&self) -> bool {
        self.status == CashRegisterStatus::Open
    }
}
