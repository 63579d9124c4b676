// handlers/users/create.rs - POST /api/users

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::{error, info};

use crate::auth::hash_password;
use crate::database::models::{CreateUserRequest, UserDocument, UserResponse};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::state::AppState;

use super::{UserBody, CREDENTIALS_REQUIRED};

/// Register a user. The password is stored as a bcrypt hash; uniqueness of
/// `username` is enforced by the collection's unique index.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<UserBody> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request("error").with_detail(e.body_text()))?;

    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("error").with_detail(CREDENTIALS_REQUIRED));
    }

    within(state.config.request_timeout(), async {
        let hash = hash_password(&request.password, state.config.security.bcrypt_cost).await?;

        let user = UserDocument::new(request.username, hash, Utc::now().timestamp());

        match state.users.insert(&user).await {
            Ok(()) => {}
            Err(DatabaseError::Duplicate(_)) => {
                return Err(ApiError::conflict("error").with_detail("username already exists"));
            }
            Err(e) => {
                error!("Failed to create user: {}", e);
                return Err(ApiError::internal_server_error("error").with_detail(e));
            }
        }
        info!("Created user {}", user.username);

        Ok(ApiResponse::created("success", UserBody {
            user: UserResponse::from(&user),
        }))
    })
    .await
}
