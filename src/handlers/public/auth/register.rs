// handlers/public/auth/register.rs - POST /api/register

use axum::extract::State;
use serde::Deserialize;

use super::{non_empty, TokenResponse};
use crate::database::models::UserFields;
use crate::error::ApiError;
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
}

/// Create an account and sign the new user in.
///
/// The caller picks the role; the record stores it verbatim and only the
/// exact strings "manager" and "admin" carry privileges.
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> ApiResult<TokenResponse> {
    let (Some(email), Some(password)) = (non_empty(body.email), non_empty(body.password)) else {
        return Err(ApiError::bad_request("Email and password are required"));
    };

    let hash = state
        .passwords
        .hash(&password)
        .await
        .map_err(|e| ApiError::from_credential(e, "Failed to register user"))?;

    let fields = UserFields {
        name: body.name,
        email: Some(email),
        password: Some(hash),
        department: body.department,
        role: body.role,
    };
    let user = state
        .store
        .users()
        .insert(&fields)
        .await
        .map_err(|e| ApiError::from_write(e, "User", "Failed to register user"))?;

    let issued = state.tokens.issue(user.id, user.email(), user.role())?;
    tracing::info!("Registered user {} ({})", user.id, user.role());
    Ok(ApiResponse::created(TokenResponse { token: issued.token }))
}
