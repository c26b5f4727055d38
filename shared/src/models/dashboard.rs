//! Dashboard Model

use serde::{Deserialize, Serialize};

/// Counters shown on the administration landing page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub branches: u64,
    pub employees: u64,
    pub providers: u64,
    pub pending_orders: u64,
    pub buys_today: u64,
}
