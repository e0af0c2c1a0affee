// handlers/public/auth/login.rs - POST /api/login

use axum::extract::State;
use serde::Deserialize;

use super::{non_empty, TokenResponse};
use crate::error::{ApiError, ResultExt};
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Exchange email and password for a bearer token.
///
/// Unknown email and wrong password produce the same 401 so the endpoint
/// does not reveal which accounts exist.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let (Some(email), Some(password)) = (non_empty(body.email), non_empty(body.password)) else {
        return Err(ApiError::bad_request("Email and password are required"));
    };

    let user = state
        .store
        .find_user_by_email(&email)
        .await
        .or_internal("Failed to log in")?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let verified = match state.passwords.verify(&password, user.password_hash()).await {
        Ok(verified) => verified,
        Err(e) => {
            // Stored hash unusable; the account cannot log in
            tracing::error!("Password check failed for user {}: {}", user.id, e);
            false
        }
    };
    if !verified {
        tracing::debug!("Rejected login for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let issued = state.tokens.issue(user.id, user.email(), user.role())?;
    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::ok(TokenResponse { token: issued.token }))
}
