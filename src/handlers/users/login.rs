// handlers/users/login.rs - POST /api/users/login

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use crate::auth::{issue_token, verify_password};
use crate::database::models::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::state::AppState;

use super::CREDENTIALS_REQUIRED;

const INVALID_CREDENTIALS: &str = "invalid username or password";

#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub login: LoginResponse,
}

/// Unknown user and wrong password produce the same 401.
pub async fn login_user(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginBody> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request("error").with_detail(e.body_text()))?;

    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("error").with_detail(CREDENTIALS_REQUIRED));
    }

    within(state.config.request_timeout(), async {
        let user = match state.users.find_by_username(&request.username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("Login for unknown user {}", request.username);
                return Err(ApiError::unauthorized("error").with_detail(INVALID_CREDENTIALS));
            }
            Err(e) => {
                error!("User lookup failed: {}", e);
                return Err(ApiError::internal_server_error("error").with_detail(e));
            }
        };

        if !verify_password(&request.password, &user.password).await? {
            debug!("Wrong password for {}", request.username);
            return Err(ApiError::unauthorized("error").with_detail(INVALID_CREDENTIALS));
        }

        let user_id = user.id.to_hex();
        let token = issue_token(&state.config.security, &user_id, &user.username)?;

        Ok(ApiResponse::success("success", LoginBody {
            login: LoginResponse {
                user_id,
                username: user.username,
                token,
                message: "Login successful".to_string(),
            },
        }))
    })
    .await
}
