//! Timeline ("educations") endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use folio_core::entities::TimelineEntry;
use folio_core::enums::{EntryCategory, MoveDirection};
use folio_core::inputs::NewTimelineEntry;
use folio_core::reorder::{ReorderBatch, ReorderRequest};
use folio_db::updates::timeline::TimelineEntryUpdate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, Caller};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

#[derive(Debug, Deserialize)]
pub struct CompactRequest {
    pub category: EntryCategory,
}

#[derive(Debug, Serialize)]
pub struct CompactResponse {
    pub changed: usize,
}

/// `GET /users/:handle/educations`
pub async fn list_entries(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
) -> Result<ApiJson<Vec<TimelineEntry>>, ApiError> {
    let entries = state.service().await.list_entries_by_handle(&handle).await?;
    Ok(ApiJson(entries))
}

/// `POST /educations`
pub async fn create_entry(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiJson(input): ApiJson<NewTimelineEntry>,
) -> Result<(StatusCode, ApiJson<TimelineEntry>), ApiError> {
    let entry = state.service().await.create_entry(&user_id, &input).await?;
    Ok((StatusCode::CREATED, ApiJson(entry)))
}

/// `PATCH /educations/reorder`
///
/// Responds with the caller's whole timeline after the batch is applied.
pub async fn reorder_entries(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiJson(request): ApiJson<ReorderRequest>,
) -> Result<ApiJson<Vec<TimelineEntry>>, ApiError> {
    let batch = ReorderBatch::try_from(request)?;
    let entries = state
        .service()
        .await
        .reorder_entries(&user_id, &batch)
        .await?;
    Ok(ApiJson(entries))
}

/// `POST /educations/:id/move`
pub async fn move_entry(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<MoveRequest>,
) -> Result<ApiJson<Vec<TimelineEntry>>, ApiError> {
    let entries = state
        .service()
        .await
        .move_entry(&user_id, &id, request.direction)
        .await?;
    Ok(ApiJson(entries))
}

/// `POST /educations/compact`
///
/// Renumbers one category to `0..n-1`, keeping its display order.
pub async fn compact_category(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiJson(request): ApiJson<CompactRequest>,
) -> Result<ApiJson<CompactResponse>, ApiError> {
    let changed = state
        .service()
        .await
        .compact_category(&user_id, request.category)
        .await?;
    Ok(ApiJson(CompactResponse { changed }))
}

/// `PATCH /educations/:id`
pub async fn update_entry(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<TimelineEntryUpdate>,
) -> Result<ApiJson<TimelineEntry>, ApiError> {
    let entry = state
        .service()
        .await
        .update_entry(&user_id, &id, &update)
        .await?;
    Ok(ApiJson(entry))
}

/// `DELETE /educations/:id`
pub async fn delete_entry(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    state.service().await.delete_entry(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
