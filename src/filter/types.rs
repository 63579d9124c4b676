use serde::Deserialize;

/// Raw list query string, kept as text so malformed numbers can be reported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub lang: Option<String>,
    pub influencer_ids: Option<String>,
    pub order_by: Option<String>,
}

/// Exact-match and set-membership constraints shared by page and count queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub lang: Option<String>,
    pub influencer_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub skip: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    /// Oldest created first
    CreatedOn,
    /// Latest created first
    CreatedOnNew,
    /// Most viewed first
    Popular,
    /// Last updated first
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_bson(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

/// Fully parsed list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: ListFilter,
    pub order: OrderBy,
    pub page: Pagination,
}
