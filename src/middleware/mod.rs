pub mod deadline;
pub mod response;

pub use deadline::within;
pub use response::{ApiResponse, ApiResult};
