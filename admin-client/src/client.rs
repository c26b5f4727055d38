//! Administration client
//!
//! Entry point handing out one service per resource over a shared
//! transport.

use crate::http::{HttpClient, NetworkHttpClient};
use crate::services::*;
use crate::workflow::{OrderGateway, StockGateway};
use crate::{ClientConfig, ClientResult};
use async_trait::async_trait;
use shared::models::{
    CashRegister, CreateOrderRequest, Order, ReserveStockRequest, StockLevel, StockReservation,
};

#[derive(Debug, Clone)]
pub struct AdminClient<C = NetworkHttpClient> {
    http: C,
}

impl AdminClient<NetworkHttpClient> {
    /// Build a network client from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.build_http_client()?))
    }
}

impl<C: HttpClient + Clone> AdminClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token().is_some()
    }

    pub fn companies(&self) -> CompanyService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn branches(&self) -> BranchService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn brands(&self) -> BrandService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn departments(&self) -> DepartmentService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn expense_concepts(&self) -> ExpenseConceptService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn payment_methods(&self) -> PaymentMethodService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn providers(&self) -> ProviderService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn buys(&self) -> BuyService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn employees(&self) -> EmployeeService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn products(&self) -> ProductService<C> {
        ResourceService::new(self.http.clone())
    }

    pub fn orders(&self) -> OrderService<C> {
        OrderService::new(self.http.clone())
    }

    pub fn stock(&self) -> StockService<C> {
        StockService::new(self.http.clone())
    }

    pub fn cash_registers(&self) -> CashRegisterService<C> {
        CashRegisterService::new(self.http.clone())
    }

    pub fn dashboard(&self) -> DashboardService<C> {
        DashboardService::new(self.http.clone())
    }
}

#[async_trait]
impl<C: HttpClient + Clone> StockGateway for AdminClient<C> {
    async fn levels(&self, branch_id: i64, product_ids: &[i64]) -> ClientResult<Vec<StockLevel>> {
        self.stock().levels(branch_id, product_ids).await
    }

    async fn reserve(&self, request: &ReserveStockRequest) -> ClientResult<StockReservation> {
        self.stock().reserve(request).await
    }

    async fn adjust(&self, reservation_id: &str, quantity: i32) -> ClientResult<StockReservation> {
        self.stock().adjust(reservation_id, quantity).await
    }

    async fn release(&self, reservation_id: &str) -> ClientResult<()> {
        self.stock().release(reservation_id).await
    }
}

#[async_trait]
impl<C: HttpClient + Clone> OrderGateway for AdminClient<C> {
    async fn current_register(&self, branch_id: i64) -> ClientResult<Option<CashRegister>> {
        self.cash_registers().current(branch_id).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        self.orders().create(request).await
    }
}
