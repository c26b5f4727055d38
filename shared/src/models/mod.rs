//! Data models
//!
//! Resource records as served by the REST API, with their create/update
//! payloads. Payloads carry the form rules through `validator`.
//! All IDs are `i64`; soft delete is the `is_active` flag.

pub mod branch;
pub mod brand;
pub mod buy;
pub mod cash_register;
pub mod company;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod expense_concept;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod provider;
pub mod stock;

// Re-exports
pub use branch::*;
pub use brand::*;
pub use buy::*;
pub use cash_register::*;
pub use company::*;
pub use dashboard::*;
pub use department::*;
pub use employee::*;
pub use expense_concept::*;
pub use order::*;
pub use payment_method::*;
pub use product::*;
pub use provider::*;
pub use stock::*;

use serde::{Deserialize, Serialize};

/// Soft delete / restore payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChange {
    pub is_active: bool,
}
