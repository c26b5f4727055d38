//! Shared types for the branch administration client
//!
//! Resource models and their form rules, list/pagination types, the API
//! envelope, user notices and the point-of-sale order draft.

pub mod models;
pub mod notice;
pub mod order;
pub mod query;
pub mod response;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use notice::{Notice, NoticeLevel};
pub use order::{DraftError, OrderDraft, ProductCatalog};
pub use query::{ListQuery, PaginatedResponse, StatusFilter};
pub use response::ApiResponse;
pub use validation::FormError;
