// admin-client/tests/common/mod.rs
// Scripted transport shared by the integration tests

#![allow(dead_code)]

use admin_client::{ClientError, ClientResult, HttpClient};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::models::{Order, OrderStatus, Product};
use shared::order::Fulfillment;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted reply of one route
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// Transport failure surfaced as an internal error
    Fail(String),
}

/// Request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(&'static str, String), Reply>,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub struct MockHttp {
    state: Arc<Mutex<MockState>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a success envelope around `data`
    pub fn ok(&self, method: &'static str, path: &str, data: impl Serialize) -> &Self {
        let data = serde_json::to_value(data).unwrap();
        self.route(method, path, Reply::Json(envelope(data)))
    }

    /// Answer `method path` with an error envelope
    pub fn rejected(&self, method: &'static str, path: &str, code: &str, message: &str) -> &Self {
        self.route(
            method,
            path,
            Reply::Json(json!({ "code": code, "message": message })),
        )
    }

    pub fn fail(&self, method: &'static str, path: &str, message: &str) -> &Self {
        self.route(method, path, Reply::Fail(message.to_string()))
    }

    pub fn route(&self, method: &'static str, path: &str, reply: Reply) -> &Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method, path.to_string()), reply);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    fn respond<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<T> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(Recorded {
                method,
                path: path.to_string(),
                body,
            });
            state.routes.get(&(method, path.to_string())).cloned()
        };
        match reply {
            Some(Reply::Json(value)) => Ok(serde_json::from_value(value)?),
            Some(Reply::Fail(message)) => Err(ClientError::Internal(message)),
            None => Err(ClientError::NotFound(format!("{} {}", method, path))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.respond("GET", path, None)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.respond("POST", path, Some(body))
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.respond("POST", path, None)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.respond("PUT", path, Some(body))
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.respond("DELETE", path, None)
    }

    fn token(&self) -> Option<&str> {
        None
    }
}

pub fn envelope(data: Value) -> Value {
    json!({ "code": "E0000", "message": "Success", "data": data })
}

pub fn count(total: u64) -> Value {
    json!({ "total": total })
}

pub fn product(id: i64, price: f64) -> Product {
    Product {
        id,
        sku: format!("SKU-{:03}", id),
        name: format!("Product {}", id),
        price,
        brand_id: None,
        department_id: None,
        is_active: true,
    }
}

pub fn order(id: i64, status: OrderStatus) -> Order {
    Order {
        id,
        folio: format!("F-{:05}", id),
        branch_id: 1,
        employee_id: 10,
        customer_name: "Ana López".to_string(),
        customer_phone: None,
        notes: None,
        items: Vec::new(),
        discount: None,
        discount_authorized_by: None,
        fulfillment: Fulfillment::Pickup,
        subtotal: 100.0,
        discount_amount: 0.0,
        delivery_price: 0.0,
        total: 100.0,
        advance: 0.0,
        remaining_balance: 100.0,
        payment_method_id: None,
        status,
        created_at: Utc::now(),
    }
}
