use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Run a handler body under a per-request deadline.
///
/// Sub-operations already completed (uploads sent to the CDN, writes
/// acknowledged by the database) are not rolled back when the deadline fires.
pub async fn within<T, F>(deadline: Duration, work: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(deadline, work).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("Request exceeded its {:?} deadline", deadline);
            Err(ApiError::internal_server_error("error").with_detail("context deadline exceeded"))
        }
    }
}
