// handlers/protected/records.rs - CRUD steps shared by the device, user and
// assignment handlers. Every message is derived from the model's entity.

use serde_json::Value;

use crate::database::models::Model;
use crate::database::Repository;
use crate::error::{ApiError, ResultExt};
use crate::middleware::{ApiResponse, ApiResult};

/// Path ids are numeric; anything else cannot name a record.
pub fn parse_id<T: Model>(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| not_found::<T>())
}

pub fn not_found<T: Model>() -> ApiError {
    ApiError::not_found(format!("{} not found", T::ENTITY.singular()))
}

/// "Failed to fetch device", "Failed to delete user", ...
fn failure<T: Model>(verb: &str) -> String {
    format!("Failed to {} {}", verb, T::ENTITY.singular().to_lowercase())
}

pub async fn list<T: Model>(repo: &Repository<T>) -> ApiResult<Vec<T>> {
    let rows = repo
        .list()
        .await
        .or_internal(&format!("Failed to fetch {}", T::ENTITY.table()))?;
    Ok(ApiResponse::ok(rows))
}

pub async fn show<T: Model>(repo: &Repository<T>, raw_id: &str) -> ApiResult<T> {
    let id = parse_id::<T>(raw_id)?;
    repo.get(id)
        .await
        .or_internal(&failure::<T>("fetch"))?
        .map(ApiResponse::ok)
        .ok_or_else(not_found::<T>)
}

pub async fn create<T: Model>(repo: &Repository<T>, fields: T::Fields) -> ApiResult<T> {
    let record = repo
        .insert(&fields)
        .await
        .map_err(|e| ApiError::from_write(e, T::ENTITY.singular(), &failure::<T>("create")))?;
    tracing::info!("Created {} {}", T::ENTITY.singular().to_lowercase(), record.id());
    Ok(ApiResponse::created(record))
}

pub async fn update<T: Model>(repo: &Repository<T>, raw_id: &str, patch: T::Fields) -> ApiResult<T> {
    let id = parse_id::<T>(raw_id)?;
    repo.update(id, patch)
        .await
        .map_err(|e| ApiError::from_write(e, T::ENTITY.singular(), &failure::<T>("update")))?
        .map(ApiResponse::ok)
        .ok_or_else(not_found::<T>)
}

pub async fn remove<T: Model>(repo: &Repository<T>, raw_id: &str) -> ApiResult<Value> {
    let id = parse_id::<T>(raw_id)?;
    let deleted = repo.delete(id).await.or_internal(&failure::<T>("delete"))?;
    if !deleted {
        return Err(not_found::<T>());
    }
    tracing::info!("Deleted {} {}", T::ENTITY.singular().to_lowercase(), id);
    Ok(ApiResponse::message(format!(
        "{} deleted successfully",
        T::ENTITY.singular()
    )))
}
