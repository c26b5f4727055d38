//! Orders service

use crate::http::{api_call, with_query, HttpClient, Method};
use crate::{ClientError, ClientResult};
use shared::models::{
    CancelOrderRequest, CreateOrderRequest, Order, OrderStatus, OrderStatusUpdate,
};
use shared::response::CountResponse;
use shared::validation::validate_form;
use shared::{ListQuery, PaginatedResponse};
use tracing::info;

const PATH: &str = "orders";

#[derive(Debug, Clone)]
pub struct OrderService<C> {
    http: C,
}

impl<C: HttpClient> OrderService<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery) -> ClientResult<PaginatedResponse<Order>> {
        let path = with_query(PATH, &query.pairs());
        api_call(&self.http, Method::Get, &path, None).await
    }

    /// Orders of a branch in a given status
    pub async fn count_by_status(&self, branch_id: Option<i64>, status: OrderStatus) -> ClientResult<u64> {
        let status = serde_json::to_value(status)?
            .as_str()
            .map(str::to_string)
            .unwrap_or_default();
        let mut pairs = vec![("order_status", status)];
        if let Some(branch_id) = branch_id {
            pairs.push(("branch_id", branch_id.to_string()));
        }
        let path = with_query(&format!("{}/count", PATH), &pairs);
        let count: CountResponse = api_call(&self.http, Method::Get, &path, None).await?;
        Ok(count.total)
    }

    pub async fn get(&self, id: i64) -> ClientResult<Order> {
        api_call(&self.http, Method::Get, &format!("{}/{}", PATH, id), None).await
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        validate_form(request)?;
        let body = serde_json::to_value(request)?;
        let order: Order = api_call(&self.http, Method::Post, PATH, Some(body)).await?;
        info!(order_id = order.id, folio = %order.folio, total = order.total, "order created");
        Ok(order)
    }

    /// Move an order forward in its workflow
    pub async fn update_status(&self, order: &Order, next: OrderStatus) -> ClientResult<Order> {
        if !order.status.can_transition_to(next) {
            return Err(ClientError::Validation(format!(
                "Order {} cannot go from {:?} to {:?}",
                order.folio, order.status, next
            )));
        }
        let body = serde_json::to_value(OrderStatusUpdate { status: next })?;
        let updated: Order = api_call(
            &self.http,
            Method::Put,
            &format!("{}/{}/status", PATH, order.id),
            Some(body),
        )
        .await?;
        info!(order_id = order.id, status = ?next, "order status changed");
        Ok(updated)
    }

    pub async fn cancel(&self, order: &Order, reason: impl Into<String>) -> ClientResult<Order> {
        if !order.status.can_transition_to(OrderStatus::Cancelled) {
            return Err(ClientError::Validation(format!(
                "Order {} is already {:?}",
                order.folio, order.status
            )));
        }
        let request = CancelOrderRequest {
            reason: reason.into().trim().to_string(),
        };
        validate_form(&request)?;
        let body = serde_json::to_value(&request)?;
        let cancelled: Order = api_call(
            &self.http,
            Method::Post,
            &format!("{}/{}/cancel", PATH, order.id),
            Some(body),
        )
        .await?;
        info!(order_id = order.id, "order cancelled");
        Ok(cancelled)
    }
}
