//! Cash register service

use crate::http::{api_call_opt, with_query, HttpClient, Method};
use crate::ClientResult;
use shared::models::CashRegister;

#[derive(Debug, Clone)]
pub struct CashRegisterService<C> {
    http: C,
}

impl<C: HttpClient> CashRegisterService<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Open register session of a branch, if any
    pub async fn current(&self, branch_id: i64) -> ClientResult<Option<CashRegister>> {
        let path = with_query("cash-registers/current", &[("branch_id", branch_id.to_string())]);
        api_call_opt(&self.http, Method::Get, &path, None).await
    }
}
