use axum::extract::State;

use crate::database::models::User;
use crate::error::{ApiError, ResultExt};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/users/profile - the caller's own user record
pub async fn profile_get(State(state): State<AppState>, user: AuthUser) -> ApiResult<User> {
    state
        .store
        .users()
        .get(user.id)
        .await
        .or_internal("Failed to fetch user")?
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::not_found("User not found"))
}
