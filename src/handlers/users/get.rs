// handlers/users/get.rs - GET /api/users/:user_id

use axum::extract::{Path, State};
use tracing::error;

use crate::database::models::UserResponse;
use crate::database::parse_object_id;
use crate::error::ApiError;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::state::AppState;

use super::UserBody;

pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<String>) -> ApiResult<UserBody> {
    let id = parse_object_id(&user_id).map_err(|_| ApiError::bad_request("error").with_detail("invalid user ID"))?;

    within(state.config.request_timeout(), async {
        match state.users.find_by_id(id).await {
            Ok(Some(user)) => Ok(ApiResponse::success("success", UserBody {
                user: UserResponse::from(&user),
            })),
            Ok(None) => Err(ApiError::not_found("error").with_detail("user not found")),
            Err(e) => {
                error!("User lookup failed: {}", e);
                Err(ApiError::internal_server_error("error").with_detail(e))
            }
        }
    })
    .await
}
