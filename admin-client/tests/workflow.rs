// admin-client/tests/workflow.rs
// Order workflow against an in-memory stock server

mod common;

use admin_client::{
    AdminClient, ClientError, ClientResult, OrderGateway, OrderWorkflow, StockGateway,
};
use async_trait::async_trait;
use chrono::Utc;
use common::{MockHttp, order, product};
use shared::models::{
    CashRegister, CashRegisterStatus, CreateOrderRequest, Order, OrderStatus, PaymentKind,
    PaymentMethod, Product, ReserveStockRequest, Role, StockLevel, StockReservation,
};
use shared::order::{AdvancePayment, Discount, Fulfillment, Operator};
use shared::DraftError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ServerState {
    /// (branch, product) -> free units
    stock: HashMap<(i64, i64), i32>,
    reservations: HashMap<String, StockReservation>,
    next_id: u32,
    calls: Vec<String>,
    reject_reservations: bool,
    failing_releases: HashSet<String>,
    failing_levels: HashSet<i64>,
    fail_create: bool,
    register: Option<CashRegister>,
    created: Vec<CreateOrderRequest>,
}

#[derive(Clone, Default)]
struct FakeServer {
    state: Arc<Mutex<ServerState>>,
}

impl FakeServer {
    fn with_stock(levels: &[(i64, i64, i32)]) -> Self {
        let server = Self::default();
        {
            let mut state = server.state.lock().unwrap();
            for &(branch_id, product_id, units) in levels {
                state.stock.insert((branch_id, product_id), units);
            }
        }
        server
    }

    fn state(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap()
    }

    fn free(&self, branch_id: i64, product_id: i64) -> i32 {
        self.state().stock.get(&(branch_id, product_id)).copied().unwrap_or(0)
    }

    fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }
}

#[async_trait]
impl StockGateway for FakeServer {
    async fn levels(&self, branch_id: i64, product_ids: &[i64]) -> ClientResult<Vec<StockLevel>> {
        let state = self.state();
        if state.failing_levels.contains(&branch_id) {
            return Err(ClientError::Internal("stock unavailable".into()));
        }
        Ok(product_ids
            .iter()
            .filter_map(|&product_id| {
                state.stock.get(&(branch_id, product_id)).map(|&available| StockLevel {
                    branch_id,
                    product_id,
                    available,
                })
            })
            .collect())
    }

    async fn reserve(&self, request: &ReserveStockRequest) -> ClientResult<StockReservation> {
        let mut state = self.state();
        state
            .calls
            .push(format!("reserve {} x{}", request.product_id, request.quantity));
        if state.reject_reservations {
            return Err(ClientError::Conflict("stock changed".into()));
        }
        let key = (request.branch_id, request.product_id);
        let free = state.stock.get(&key).copied().unwrap_or(0);
        if request.quantity > free {
            return Err(ClientError::Conflict("not enough stock".into()));
        }
        state.stock.insert(key, free - request.quantity);
        state.next_id += 1;
        let reservation = StockReservation {
            id: format!("res-{}", state.next_id),
            branch_id: request.branch_id,
            product_id: request.product_id,
            quantity: request.quantity,
            expires_at: None,
        };
        state
            .reservations
            .insert(reservation.id.clone(), reservation.clone());
        Ok(reservation)
    }

    async fn adjust(&self, reservation_id: &str, quantity: i32) -> ClientResult<StockReservation> {
        let mut state = self.state();
        state.calls.push(format!("adjust {} x{}", reservation_id, quantity));
        if state.reject_reservations {
            return Err(ClientError::Conflict("stock changed".into()));
        }
        let mut reservation = state
            .reservations
            .get(reservation_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(reservation_id.to_string()))?;
        let key = (reservation.branch_id, reservation.product_id);
        let free = state.stock.get(&key).copied().unwrap_or(0);
        let delta = quantity - reservation.quantity;
        if delta > free {
            return Err(ClientError::Conflict("not enough stock".into()));
        }
        state.stock.insert(key, free - delta);
        reservation.quantity = quantity;
        state
            .reservations
            .insert(reservation.id.clone(), reservation.clone());
        Ok(reservation)
    }

    async fn release(&self, reservation_id: &str) -> ClientResult<()> {
        let mut state = self.state();
        state.calls.push(format!("release {}", reservation_id));
        if state.failing_releases.contains(reservation_id) {
            return Err(ClientError::Internal("release failed".into()));
        }
        if let Some(r) = state.reservations.remove(reservation_id) {
            *state.stock.entry((r.branch_id, r.product_id)).or_insert(0) += r.quantity;
        }
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for FakeServer {
    async fn current_register(&self, _branch_id: i64) -> ClientResult<Option<CashRegister>> {
        Ok(self.state().register.clone())
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        let mut state = self.state();
        if state.fail_create {
            return Err(ClientError::Internal("timeout".into()));
        }
        state.created.push(request.clone());
        let mut created = order(state.created.len() as i64, OrderStatus::Pending);
        created.total = request.totals.total;
        Ok(created)
    }
}

fn operator(role: Role) -> Operator {
    Operator {
        employee_id: 10,
        name: "Lucía".to_string(),
        role,
        branch_id: 1,
    }
}

fn products() -> Vec<Product> {
    vec![product(1, 25.0), product(2, 40.0)]
}

async fn workflow(server: &FakeServer, role: Role) -> OrderWorkflow<FakeServer> {
    let mut workflow = OrderWorkflow::new(server.clone(), operator(role));
    workflow.load_catalog(products()).await.unwrap();
    workflow
}

fn cash_method() -> PaymentMethod {
    PaymentMethod {
        id: 1,
        name: "Efectivo".to_string(),
        kind: PaymentKind::Cash,
        requires_reference: false,
        is_active: true,
    }
}

#[tokio::test]
async fn test_add_product_reserves_then_adjusts() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;

    wf.add_product(1, 2).await.unwrap();
    wf.add_product(1, 1).await.unwrap();

    let line = wf.draft().item(1).unwrap();
    assert_eq!(line.quantity, 3);
    assert_eq!(line.reserved_quantity(), 3);
    assert_eq!(wf.catalog().available(1), 2);
    assert_eq!(server.free(1, 1), 2);
    assert_eq!(server.calls(), vec!["reserve 1 x2", "adjust res-1 x3"]);
    assert_eq!(wf.draft().totals().subtotal, 75.0);
}

#[tokio::test]
async fn test_add_beyond_availability_is_rejected_locally() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;

    let err = wf.add_product(2, 3).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Draft(DraftError::InsufficientStock { product_id: 2, requested: 3, available: 2 })
    ));
    assert!(server.calls().is_empty());
    assert!(wf.draft().is_empty());
}

#[tokio::test]
async fn test_rejected_reservation_leaves_draft_unchanged() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;
    wf.add_product(1, 1).await.unwrap();

    server.state().reject_reservations = true;
    assert!(matches!(wf.add_product(1, 2).await, Err(ClientError::Conflict(_))));
    assert!(matches!(wf.add_product(2, 1).await, Err(ClientError::Conflict(_))));

    assert_eq!(wf.draft().items().len(), 1);
    assert_eq!(wf.draft().item(1).unwrap().quantity, 1);
    assert_eq!(wf.catalog().available(1), 4);
    assert_eq!(wf.catalog().available(2), 2);
}

#[tokio::test]
async fn test_change_quantity_and_remove() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;
    wf.add_product(1, 4).await.unwrap();

    wf.change_quantity(1, 1).await.unwrap();
    assert_eq!(wf.draft().item(1).unwrap().quantity, 1);
    assert_eq!(wf.catalog().available(1), 4);
    assert_eq!(server.free(1, 1), 4);

    // Zero removes the line and gives the stock back
    wf.change_quantity(1, 0).await.unwrap();
    assert!(wf.draft().is_empty());
    assert_eq!(wf.catalog().available(1), 5);
    assert_eq!(server.free(1, 1), 5);

    let err = wf.change_quantity(2, 1).await.unwrap_err();
    assert!(matches!(err, ClientError::Draft(DraftError::ItemNotFound(2))));
}

#[tokio::test]
async fn test_cancel_releases_everything() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;
    wf.add_product(1, 2).await.unwrap();
    wf.add_product(2, 2).await.unwrap();
    let reference = wf.draft().reference();

    wf.cancel().await.unwrap();

    assert!(wf.draft().is_empty());
    assert_ne!(wf.draft().reference(), reference);
    assert_eq!(server.free(1, 1), 5);
    assert_eq!(server.free(1, 2), 2);
    assert!(server.state().reservations.is_empty());
}

#[tokio::test]
async fn test_failed_release_keeps_the_line() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;
    wf.add_product(1, 2).await.unwrap();
    wf.add_product(2, 1).await.unwrap();
    server.state().failing_releases.insert("res-1".to_string());

    let err = wf.cancel().await.unwrap_err();

    assert!(matches!(err, ClientError::Internal(_)));
    let remaining: Vec<i64> = wf.draft().items().iter().map(|i| i.product_id).collect();
    assert_eq!(remaining, vec![1]);
    assert_eq!(server.free(1, 2), 2);
}

#[tokio::test]
async fn test_switch_branch() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2), (2, 1, 9)]);

    let mut cashier = workflow(&server, Role::Cashier).await;
    let err = cashier.switch_branch(2, products()).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Draft(DraftError::BranchChangeNotAllowed(Role::Cashier))
    ));

    let mut admin = workflow(&server, Role::Admin).await;
    admin.add_product(1, 2).await.unwrap();
    server.state().register = Some(CashRegister {
        id: 4,
        branch_id: 2,
        opened_by: 10,
        opened_at: Utc::now(),
        opening_amount: 500.0,
        status: CashRegisterStatus::Open,
        closed_at: None,
    });

    admin.switch_branch(2, products()).await.unwrap();

    assert_eq!(admin.draft().branch_id(), 2);
    assert!(admin.draft().is_empty());
    assert_eq!(admin.catalog().branch_id(), 2);
    assert_eq!(admin.catalog().available(1), 9);
    assert_eq!(admin.draft().register().register_id(), Some(4));
    assert_eq!(server.free(1, 1), 5);
}

#[tokio::test]
async fn test_failed_switch_keeps_branch_and_catalog() {
    let server = FakeServer::with_stock(&[(1, 1, 50), (2, 1, 0)]);
    let mut admin = workflow(&server, Role::Admin).await;
    admin.add_product(1, 2).await.unwrap();
    server.state().failing_levels.insert(2);

    let err = admin.switch_branch(2, products()).await.unwrap_err();
    assert!(matches!(err, ClientError::Internal(_)));

    // Nothing moved and nothing was released
    assert_eq!(admin.draft().branch_id(), 1);
    assert_eq!(admin.catalog().branch_id(), 1);
    assert_eq!(admin.draft().item(1).unwrap().quantity, 2);
    assert_eq!(server.free(1, 1), 48);

    // Further items are still reserved at the original branch
    admin.add_product(1, 5).await.unwrap();
    assert_eq!(server.free(1, 1), 43);
    assert_eq!(server.free(2, 1), 0);
    assert!(server
        .state()
        .reservations
        .values()
        .all(|r| r.branch_id == 1));
}

#[tokio::test]
async fn test_header_edits() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Manager).await;
    wf.add_product(1, 4).await.unwrap();

    wf.set_notes(Some("  gift wrap ".into()));
    wf.set_discount(Discount::Percentage(10.0), None).unwrap();
    wf.set_fulfillment(Fulfillment::Delivery {
        address: "Calle 5 #12".into(),
        price: 30.0,
    })
    .unwrap();
    assert_eq!(wf.draft().notes(), Some("gift wrap"));
    assert_eq!(wf.draft().totals().total, 120.0);

    let err = wf.set_customer("Ana", Some("123".into())).unwrap_err();
    assert!(matches!(err, ClientError::Draft(DraftError::InvalidCustomer(_))));

    wf.clear_discount();
    assert_eq!(wf.draft().totals().total, 130.0);
    wf.set_advance(AdvancePayment::new(&cash_method(), 30.0, None)).unwrap();
    wf.clear_advance();
    assert!(wf.draft().advance().is_none());
}

#[tokio::test]
async fn test_submit_failure_keeps_draft() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;
    wf.add_product(1, 2).await.unwrap();

    // No customer yet
    let err = wf.submit().await.unwrap_err();
    assert!(matches!(err, ClientError::Draft(DraftError::InvalidCustomer(_))));

    wf.set_customer("Ana López", None).unwrap();
    server.state().fail_create = true;
    let reference = wf.draft().reference();
    assert!(wf.submit().await.is_err());

    assert_eq!(wf.draft().reference(), reference);
    assert_eq!(wf.draft().item(1).unwrap().quantity, 2);
    // Reservations stay held for the retry
    assert_eq!(server.free(1, 1), 3);
}

#[tokio::test]
async fn test_submit_cash_advance() {
    let server = FakeServer::with_stock(&[(1, 1, 5), (1, 2, 2)]);
    let mut wf = workflow(&server, Role::Cashier).await;
    wf.add_product(1, 2).await.unwrap();
    wf.set_customer("Ana López", Some("5512345678".into())).unwrap();
    wf.set_advance(AdvancePayment::new(&cash_method(), 20.0, Some(50.0)))
        .unwrap();

    // Cash needs an open register
    let err = wf.submit().await.unwrap_err();
    assert!(matches!(err, ClientError::Draft(DraftError::CashRegisterClosed)));

    server.state().register = Some(CashRegister {
        id: 3,
        branch_id: 1,
        opened_by: 10,
        opened_at: Utc::now(),
        opening_amount: 500.0,
        status: CashRegisterStatus::Open,
        closed_at: None,
    });
    wf.refresh_register().await.unwrap();
    let reference = wf.draft().reference();

    let created = wf.submit().await.unwrap();

    assert_eq!(created.total, 50.0);
    assert!(wf.draft().is_empty());
    assert_ne!(wf.draft().reference(), reference);
    // Register survives the reset
    assert!(wf.draft().register().is_open());

    let state = server.state();
    let request = &state.created[0];
    assert_eq!(request.client_reference, reference);
    assert_eq!(request.cash_register_id, Some(3));
    assert_eq!(request.items[0].reservation_id, "res-1");
    let advance = request.advance.as_ref().unwrap();
    assert_eq!(advance.amount, 20.0);
    assert_eq!(advance.change, 30.0);
    assert_eq!(request.totals.remaining_balance, 30.0);
}

#[tokio::test]
async fn test_admin_client_as_gateway() {
    let http = MockHttp::new();
    http.ok(
        "GET",
        "stock?branch_id=1&product_ids=1%2C2",
        vec![StockLevel { branch_id: 1, product_id: 1, available: 3 }],
    );
    http.ok(
        "POST",
        "stock/reservations",
        StockReservation {
            id: "abc".to_string(),
            branch_id: 1,
            product_id: 1,
            quantity: 2,
            expires_at: None,
        },
    );
    http.ok("DELETE", "stock/reservations/abc", serde_json::Value::Null);
    let client = AdminClient::new(http.clone());

    let mut wf = OrderWorkflow::new(client, operator(Role::Cashier));
    wf.load_catalog(products()).await.unwrap();
    assert_eq!(wf.catalog().available(2), 0);

    wf.add_product(1, 2).await.unwrap();
    assert_eq!(wf.catalog().available(1), 1);
    wf.remove_product(1).await.unwrap();
    assert_eq!(wf.catalog().available(1), 3);

    let methods: Vec<_> = http.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "POST", "DELETE"]);
}
