//! REST resource services
//!
//! One thin wrapper per resource over [`api_call`](crate::http::api_call).
//! Forms are validated before sending; nothing is cached.

pub mod cash_registers;
pub mod dashboard;
pub mod orders;
pub mod resources;
pub mod stock;

pub use cash_registers::CashRegisterService;
pub use dashboard::DashboardService;
pub use orders::OrderService;
pub use resources::*;
pub use stock::StockService;

use crate::http::{api_call, with_query, HttpClient, Method};
use crate::ClientResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::StatusChange;
use shared::response::CountResponse;
use shared::validation::validate_form;
use shared::{ListQuery, PaginatedResponse};
use std::marker::PhantomData;
use tracing::info;
use validator::Validate;

/// A CRUD resource of the administration API
pub trait Resource {
    /// Route segment, e.g. `"expense-concepts"`
    const PATH: &'static str;
    type Entity: DeserializeOwned + Send;
    type Create: Serialize + Validate + Sync;
    type Update: Serialize + Validate + Sync;
}

/// List / read / create / update / soft-delete over one resource
#[derive(Debug, Clone)]
pub struct ResourceService<C, R> {
    http: C,
    _resource: PhantomData<fn() -> R>,
}

impl<C: HttpClient, R: Resource> ResourceService<C, R> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub(crate) fn http(&self) -> &C {
        &self.http
    }

    /// One page of records
    pub async fn list(&self, query: &ListQuery) -> ClientResult<PaginatedResponse<R::Entity>> {
        let path = with_query(R::PATH, &query.pairs());
        api_call(&self.http, Method::Get, &path, None).await
    }

    /// Number of records matching a query
    pub async fn count(&self, query: &ListQuery) -> ClientResult<u64> {
        let path = with_query(&format!("{}/count", R::PATH), &query.pairs());
        let count: CountResponse = api_call(&self.http, Method::Get, &path, None).await?;
        Ok(count.total)
    }

    pub async fn get(&self, id: i64) -> ClientResult<R::Entity> {
        api_call(&self.http, Method::Get, &format!("{}/{}", R::PATH, id), None).await
    }

    pub async fn create(&self, form: &R::Create) -> ClientResult<R::Entity> {
        validate_form(form)?;
        let body = serde_json::to_value(form)?;
        let entity = api_call(&self.http, Method::Post, R::PATH, Some(body)).await?;
        info!(resource = R::PATH, "record created");
        Ok(entity)
    }

    pub async fn update(&self, id: i64, form: &R::Update) -> ClientResult<R::Entity> {
        validate_form(form)?;
        let body = serde_json::to_value(form)?;
        let entity =
            api_call(&self.http, Method::Put, &format!("{}/{}", R::PATH, id), Some(body)).await?;
        info!(resource = R::PATH, id, "record updated");
        Ok(entity)
    }

    /// Restore a soft-deleted record
    pub async fn activate(&self, id: i64) -> ClientResult<R::Entity> {
        self.set_active(id, true).await
    }

    /// Soft delete
    pub async fn deactivate(&self, id: i64) -> ClientResult<R::Entity> {
        self.set_active(id, false).await
    }

    async fn set_active(&self, id: i64, is_active: bool) -> ClientResult<R::Entity> {
        let body = serde_json::to_value(StatusChange { is_active })?;
        let entity = api_call(
            &self.http,
            Method::Put,
            &format!("{}/{}/status", R::PATH, id),
            Some(body),
        )
        .await?;
        info!(resource = R::PATH, id, is_active, "record status changed");
        Ok(entity)
    }
}
