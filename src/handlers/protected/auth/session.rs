use serde_json::Value;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// POST /api/logout - end the caller's session
///
/// Tokens are stateless and stay valid until they expire; the client is
/// expected to discard its copy.
pub async fn logout_post(user: AuthUser) -> ApiResult<Value> {
    tracing::info!("User {} logged out", user.id);
    Ok(ApiResponse::message("Logout successful"))
}
