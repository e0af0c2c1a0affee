use axum::extract::State;
use serde_json::Value;

use crate::error::ResultExt;
use crate::handlers::extract::QueryParams;
use crate::middleware::{ApiResponse, ApiResult};
use crate::search::SearchParams;
use crate::state::AppState;

/// GET /search?table=&column=&type=&query= - single-column search
///
/// Table and column are checked against the schema allow-lists before any
/// SQL is built; the query value is only ever bound as a parameter.
pub async fn search_get(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> ApiResult<Vec<Value>> {
    let query = params.validate()?;
    tracing::debug!(
        "Search {}.{} ({:?})",
        query.entity.table(),
        query.column,
        query.op
    );
    let rows = state.store.search(&query).await.or_internal("Search failed")?;
    Ok(ApiResponse::ok(rows))
}
