//! Admin Client - HTTP client for the branch administration API
//!
//! Per-resource services over one REST helper, plus the point-of-sale
//! workflow that keeps an order draft and its stock reservations in step.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod services;
pub mod workflow;

pub use client::AdminClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, Method, NetworkHttpClient};
pub use workflow::{OrderGateway, OrderWorkflow, StockGateway};

// Re-export shared types for convenience
pub use shared::{ApiResponse, ListQuery, Notice, NoticeLevel, PaginatedResponse};
