//! Dashboard service
//!
//! Loads every counter concurrently. Any failed request fails the whole
//! load; there is no partial result.

use super::{BranchService, BuyService, EmployeeService, OrderService, ProviderService};
use crate::http::HttpClient;
use crate::ClientResult;
use chrono::NaiveDate;
use shared::models::{DashboardStats, OrderStatus};
use shared::ListQuery;

#[derive(Debug, Clone)]
pub struct DashboardService<C> {
    http: C,
}

impl<C: HttpClient + Clone> DashboardService<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Counters for one branch, or company-wide when `branch_id` is `None`
    ///
    /// `today` drives the purchases counter and is taken from the caller so
    /// the branch's local date is used.
    pub async fn stats(&self, branch_id: Option<i64>, today: NaiveDate) -> ClientResult<DashboardStats> {
        let branches = BranchService::new(self.http.clone());
        let employees = EmployeeService::new(self.http.clone());
        let providers = ProviderService::new(self.http.clone());
        let orders = OrderService::new(self.http.clone());
        let buys = BuyService::new(self.http.clone());

        let employee_query = match branch_id {
            Some(id) => ListQuery::new().for_branch(id),
            None => ListQuery::new(),
        };
        let all = ListQuery::new();

        let (branches, employees, providers, pending_orders, buys_today) = futures::try_join!(
            branches.count(&all),
            employees.count(&employee_query),
            providers.count(&all),
            orders.count_by_status(branch_id, OrderStatus::Pending),
            buys.count_on(branch_id, today),
        )?;

        Ok(DashboardStats {
            branches,
            employees,
            providers,
            pending_orders,
            buys_today,
        })
    }
}
