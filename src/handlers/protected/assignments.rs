// handlers/protected/assignments.rs - /api/assignments[/:id]
//
// Reads embed the assigned device and user; writes return the bare row.

use axum::extract::{Path, State};
use serde_json::Value;

use super::records;
use crate::database::models::{Assignment, AssignmentDetail, AssignmentFields};
use crate::error::ResultExt;
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/assignments
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<AssignmentDetail>> {
    let rows = state
        .store
        .list_assignments_detailed()
        .await
        .or_internal("Failed to fetch assignments")?;
    Ok(ApiResponse::ok(rows))
}

/// GET /api/assignments/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AssignmentDetail> {
    let id = records::parse_id::<Assignment>(&id)?;
    state
        .store
        .get_assignment_detailed(id)
        .await
        .or_internal("Failed to fetch assignment")?
        .map(ApiResponse::ok)
        .ok_or_else(records::not_found::<Assignment>)
}

/// POST /api/assignments (manager)
pub async fn create(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<AssignmentFields>,
) -> ApiResult<Assignment> {
    records::create(&state.store.assignments(), fields).await
}

/// PUT /api/assignments/:id (manager)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<AssignmentFields>,
) -> ApiResult<Assignment> {
    records::update(&state.store.assignments(), &id, fields).await
}

/// DELETE /api/assignments/:id (admin)
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    records::remove(&state.store.assignments(), &id).await
}
