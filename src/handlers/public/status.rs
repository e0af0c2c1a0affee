use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Inventory API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Lab equipment inventory: devices, users and assignments",
        "endpoints": {
            "auth": "/api/register, /api/login (public), /api/logout",
            "devices": "/api/devices[/:id]",
            "users": "/api/users[/:id], /api/users/profile",
            "assignments": "/api/assignments[/:id]",
            "search": "/search?table=&column=&type=&query=",
        }
    }))
}

/// GET /health - database connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
