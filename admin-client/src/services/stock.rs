//! Stock service
//!
//! Availability reads and reservation calls. Consistency between
//! concurrent drafts is enforced server-side; a failed reservation is
//! reported as is.

use crate::http::{api_call, api_call_unit, with_query, HttpClient, Method};
use crate::ClientResult;
use shared::models::{AdjustReservationRequest, ReserveStockRequest, StockLevel, StockReservation};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct StockService<C> {
    http: C,
}

impl<C: HttpClient> StockService<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Levels of the given products at a branch; empty ids means all
    pub async fn levels(&self, branch_id: i64, product_ids: &[i64]) -> ClientResult<Vec<StockLevel>> {
        let mut pairs = vec![("branch_id", branch_id.to_string())];
        if !product_ids.is_empty() {
            let ids = product_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("product_ids", ids));
        }
        api_call(&self.http, Method::Get, &with_query("stock", &pairs), None).await
    }

    pub async fn reserve(&self, request: &ReserveStockRequest) -> ClientResult<StockReservation> {
        let body = serde_json::to_value(request)?;
        let reservation: StockReservation =
            api_call(&self.http, Method::Post, "stock/reservations", Some(body)).await?;
        info!(
            reservation_id = %reservation.id,
            product_id = reservation.product_id,
            quantity = reservation.quantity,
            "stock reserved"
        );
        Ok(reservation)
    }

    /// Set the held quantity of a reservation
    pub async fn adjust(&self, reservation_id: &str, quantity: i32) -> ClientResult<StockReservation> {
        let body = serde_json::to_value(AdjustReservationRequest { quantity })?;
        let reservation = api_call(
            &self.http,
            Method::Put,
            &format!("stock/reservations/{}", reservation_id),
            Some(body),
        )
        .await?;
        debug!(reservation_id, quantity, "reservation adjusted");
        Ok(reservation)
    }

    pub async fn release(&self, reservation_id: &str) -> ClientResult<()> {
        api_call_unit(
            &self.http,
            Method::Delete,
            &format!("stock/reservations/{}", reservation_id),
            None,
        )
        .await?;
        debug!(reservation_id, "reservation released");
        Ok(())
    }
}
