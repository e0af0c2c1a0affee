// handlers/protected/devices.rs - /api/devices[/:id]

use axum::extract::{Path, State};
use serde_json::Value;

use super::records;
use crate::database::models::{Device, DeviceFields};
use crate::handlers::extract::JsonBody;
use crate::middleware::ApiResult;
use crate::state::AppState;

/// GET /api/devices
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Device>> {
    records::list(&state.store.devices()).await
}

/// GET /api/devices/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Device> {
    records::show(&state.store.devices(), &id).await
}

/// POST /api/devices (manager)
pub async fn create(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<DeviceFields>,
) -> ApiResult<Device> {
    records::create(&state.store.devices(), fields).await
}

/// PUT /api/devices/:id (manager)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<DeviceFields>,
) -> ApiResult<Device> {
    records::update(&state.store.devices(), &id, fields).await
}

/// DELETE /api/devices/:id (admin)
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    records::remove(&state.store.devices(), &id).await
}
