use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::types::{ListFilter, ListParams, ListQuery, Pagination};

/// Turns list query parameters into a [`ListQuery`].
pub struct Filter {
    default_limit: i64,
    max_limit: i64,
}

impl Filter {
    pub fn new(default_limit: i64, max_limit: i64) -> Self {
        Self { default_limit, max_limit }
    }

    pub fn parse(&self, params: &ListParams) -> Result<ListQuery, FilterError> {
        let page = self.pagination(non_empty(&params.limit), non_empty(&params.page))?;

        let filter = ListFilter {
            lang: non_empty(&params.lang).map(str::to_string),
            influencer_ids: non_empty(&params.influencer_ids).map(split_ids),
        };

        Ok(ListQuery {
            filter,
            order: FilterOrder::parse(non_empty(&params.order_by)),
            page,
        })
    }

    /// `page` is 1-based; the skip offset is `(page - 1) * limit`.
    pub fn pagination(&self, limit: Option<&str>, page: Option<&str>) -> Result<Pagination, FilterError> {
        let limit = match limit {
            Some(raw) => {
                let value: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| FilterError::InvalidLimit(format!("{:?}: {}", raw, e)))?;
                if value < 1 {
                    return Err(FilterError::InvalidLimit(format!("{} must be at least 1", value)));
                }
                value.min(self.max_limit)
            }
            None => self.default_limit,
        };

        let page = match page {
            Some(raw) => {
                let value: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| FilterError::InvalidPage(format!("{:?}: {}", raw, e)))?;
                if value < 1 {
                    return Err(FilterError::InvalidPage(format!("{} must be at least 1", value)));
                }
                value
            }
            None => 1,
        };

        Ok(Pagination {
            limit,
            skip: (page - 1).saturating_mul(limit) as u64,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Comma-separated id list, trimmed, empties dropped.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
