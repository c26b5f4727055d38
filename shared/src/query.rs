//! List query and pagination types
//!
//! Every list page (branches, buys, providers, ...) drives the same
//! search / status filter / page triple.

use serde::{Deserialize, Serialize};

/// Default page size of list pages
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Status filter over the soft-delete flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    Active,
    Inactive,
    All,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
            StatusFilter::All => "all",
        }
    }
}

/// List request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListQuery {
    /// Free text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    /// Page number (1-based)
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    /// Sort key (e.g. "name", "created_at_desc")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQuery {
    /// First page of active records
    pub fn new() -> Self {
        Self {
            search: None,
            status: StatusFilter::Active,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            branch_id: None,
            sort: None,
        }
    }

    /// Set search text; blank text clears it and goes back to page 1
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.page = 1;
        self
    }

    /// Add pagination
    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn for_branch(mut self, branch_id: i64) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self.page = 1;
        self
    }

    /// Add sorting
    pub fn order_by(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Query string pairs in a stable order
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if self.status != StatusFilter::Active {
            pairs.push(("status", self.status.as_str().to_string()));
        }
        if let Some(branch_id) = self.branch_id {
            pairs.push(("branch_id", branch_id.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    /// Total number of matching records
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, per_page: u32) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page as u64).max(1) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            per_page,
            total_pages,
        }
    }

    /// Single page response (unpaginated endpoints)
    pub fn single_page(data: Vec<T>) -> Self {
        let total = data.len() as u64;
        Self {
            data,
            total,
            page: 1,
            per_page: total as u32,
            total_pages: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let query = ListQuery::new()
            .search("  centro ")
            .page(2, 25)
            .with_status(StatusFilter::All)
            .for_branch(7);
        // with_status resets the page
        assert_eq!(query.page, 1);
        assert_eq!(
            query.pairs(),
            vec![
                ("page", "1".to_string()),
                ("per_page", "25".to_string()),
                ("search", "centro".to_string()),
                ("status", "all".to_string()),
                ("branch_id", "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let query = ListQuery::new().search("   ");
        assert!(query.search.is_none());
        assert_eq!(query.pairs().len(), 2);
    }

    #[test]
    fn test_page_bounds() {
        let query = ListQuery::new().page(0, 1000);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_total_pages() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 23, 1, 10);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_prev());

        let empty: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_next());
    }
}
