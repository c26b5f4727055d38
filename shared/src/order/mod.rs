//! Order draft module
//!
//! Client-side state of an order being composed at the point of sale:
//! - **draft**: the state machine that owns items, discount, fulfillment,
//!   advance payment and cash register state
//! - **calculator**: derived totals, recomputed on every read
//! - **catalog**: product list with the branch's stock availability
//! - **money**: decimal helpers and monetary bounds
//!
//! Stock is held server-side through reservations; the draft only records
//! which reservation covers each line.

pub mod calculator;
pub mod catalog;
pub mod draft;
pub mod error;
pub mod money;
pub mod types;

// Re-exports
pub use calculator::calculate_totals;
pub use catalog::{CatalogEntry, ProductCatalog};
pub use draft::OrderDraft;
pub use error::DraftError;
pub use types::*;
