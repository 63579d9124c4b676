pub mod types;
pub mod filter;
pub mod filter_where;
pub mod filter_order;
pub mod error;

pub use types::*;
pub use filter::{split_ids, Filter};
pub use filter_order::FilterOrder;
pub use filter_where::FilterWhere;
pub use error::FilterError;
