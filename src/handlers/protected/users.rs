// handlers/protected/users.rs - /api/users[/:id]
//
// Passwords in request bodies are hashed before they reach storage and are
// never serialized back out.

use axum::extract::{Path, State};
use serde_json::Value;

use super::records;
use crate::auth::PasswordHasher;
use crate::database::models::{User, UserFields};
use crate::error::ApiError;
use crate::handlers::extract::JsonBody;
use crate::middleware::ApiResult;
use crate::state::AppState;

/// GET /api/users (admin)
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    records::list(&state.store.users()).await
}

/// GET /api/users/:id (manager)
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    records::show(&state.store.users(), &id).await
}

/// POST /api/users (admin)
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut fields): JsonBody<UserFields>,
) -> ApiResult<User> {
    hash_password(&state.passwords, &mut fields, "Failed to create user").await?;
    records::create(&state.store.users(), fields).await
}

/// PUT /api/users/:id (admin)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(mut fields): JsonBody<UserFields>,
) -> ApiResult<User> {
    hash_password(&state.passwords, &mut fields, "Failed to update user").await?;
    records::update(&state.store.users(), &id, fields).await
}

/// DELETE /api/users/:id (admin)
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    records::remove(&state.store.users(), &id).await
}

/// Replace a plaintext `password` with its hash. Absent stays absent.
pub(crate) async fn hash_password(
    hasher: &PasswordHasher,
    fields: &mut UserFields,
    failure: &str,
) -> Result<(), ApiError> {
    if let Some(plaintext) = fields.password.take() {
        let hash = hasher
            .hash(&plaintext)
            .await
            .map_err(|e| ApiError::from_credential(e, failure))?;
        fields.password = Some(hash);
    }
    Ok(())
}
