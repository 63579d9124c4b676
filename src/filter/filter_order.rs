use mongodb::bson::{doc, Document};

use super::types::{OrderBy, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Unrecognized or absent values fall back to most recently updated.
    pub fn parse(order_by: Option<&str>) -> OrderBy {
        match order_by {
            Some("created_on") => OrderBy::CreatedOn,
            Some("created_on_new") => OrderBy::CreatedOnNew,
            Some("popular") => OrderBy::Popular,
            _ => OrderBy::Recent,
        }
    }

    pub fn sort_key(order: OrderBy) -> (&'static str, SortDirection) {
        match order {
            OrderBy::CreatedOn => ("created_on", SortDirection::Asc),
            OrderBy::CreatedOnNew => ("created_on", SortDirection::Desc),
            OrderBy::Popular => ("views", SortDirection::Desc),
            OrderBy::Recent => ("updated_on", SortDirection::Desc),
        }
    }

    pub fn generate(order: OrderBy) -> Document {
        let (field, direction) = Self::sort_key(order);
        let mut sort = Document::new();
        sort.insert(field, direction.to_bson());
        sort
    }
}
