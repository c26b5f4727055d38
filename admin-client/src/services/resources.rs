//! Resource declarations

use super::{Resource, ResourceService};
use crate::http::{api_call, with_query, HttpClient, Method};
use crate::ClientResult;
use chrono::NaiveDate;
use shared::models::*;
use shared::{ListQuery, PaginatedResponse};

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident, $path:literal, $entity:ty, $create:ty, $update:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Resource for $name {
            const PATH: &'static str = $path;
            type Entity = $entity;
            type Create = $create;
            type Update = $update;
        }
    };
}

resource!(Companies, "companies", Company, CompanyCreate, CompanyUpdate);
resource!(Branches, "branches", Branch, BranchCreate, BranchUpdate);
resource!(Brands, "brands", Brand, BrandCreate, BrandUpdate);
resource!(Departments, "departments", Department, DepartmentCreate, DepartmentUpdate);
resource!(
    ExpenseConcepts,
    "expense-concepts",
    ExpenseConcept,
    ExpenseConceptCreate,
    ExpenseConceptUpdate
);
resource!(
    PaymentMethods,
    "payment-methods",
    PaymentMethod,
    PaymentMethodCreate,
    PaymentMethodUpdate
);
resource!(Providers, "providers", Provider, ProviderCreate, ProviderUpdate);
resource!(
    /// Purchases
    Buys,
    "buys",
    Buy,
    BuyCreate,
    BuyUpdate
);
resource!(Employees, "employees", Employee, EmployeeCreate, EmployeeUpdate);
resource!(Products, "products", Product, ProductCreate, ProductUpdate);

pub type CompanyService<C> = ResourceService<C, Companies>;
pub type BranchService<C> = ResourceService<C, Branches>;
pub type BrandService<C> = ResourceService<C, Brands>;
pub type DepartmentService<C> = ResourceService<C, Departments>;
pub type ExpenseConceptService<C> = ResourceService<C, ExpenseConcepts>;
pub type PaymentMethodService<C> = ResourceService<C, PaymentMethods>;
pub type ProviderService<C> = ResourceService<C, Providers>;
pub type BuyService<C> = ResourceService<C, Buys>;
pub type EmployeeService<C> = ResourceService<C, Employees>;
pub type ProductService<C> = ResourceService<C, Products>;

/// Query pairs of a purchase date range (inclusive)
pub(crate) fn date_range_pairs(
    query: &ListQuery,
    branch_id: Option<i64>,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<(&'static str, String)> {
    let query = match branch_id {
        Some(id) => query.clone().for_branch(id),
        None => query.clone(),
    };
    let mut pairs = query.pairs();
    pairs.push(("from", from.format("%Y-%m-%d").to_string()));
    pairs.push(("to", to.format("%Y-%m-%d").to_string()));
    pairs
}

impl<C: HttpClient> ResourceService<C, Buys> {
    /// Purchases of a branch within a date range (inclusive)
    pub async fn list_between(
        &self,
        branch_id: i64,
        from: NaiveDate,
        to: NaiveDate,
        query: &ListQuery,
    ) -> ClientResult<PaginatedResponse<Buy>> {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let path = with_query("buys", &date_range_pairs(query, Some(branch_id), from, to));
        api_call(self.http(), Method::Get, &path, None).await
    }

    /// Purchases registered on one day, for a branch or company-wide
    pub async fn count_on(&self, branch_id: Option<i64>, day: NaiveDate) -> ClientResult<u64> {
        let pairs = date_range_pairs(&ListQuery::new(), branch_id, day, day);
        let path = with_query("buys/count", &pairs);
        let count: shared::response::CountResponse =
            api_call(self.http(), Method::Get, &path, None).await?;
        Ok(count.total)
    }
}

impl<C: HttpClient> ResourceService<C, Products> {
    /// Every active product, following pages until the last one
    pub async fn list_all_active(&self) -> ClientResult<Vec<Product>> {
        let mut query = ListQuery::new().page(1, shared::query::MAX_PER_PAGE);
        let mut products = Vec::new();
        loop {
            let page = self.list(&query).await?;
            let has_next = page.has_next();
            products.extend(page.data);
            if !has_next {
                break;
            }
            query = query.clone().page(query.page + 1, query.per_page);
        }
        Ok(products)
    }
}
