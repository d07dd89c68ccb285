//! The caller's own audit trail.

use axum::extract::State;

use folio_core::entities::AuditEntry;
use folio_db::repos::audit::AuditFilter;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery, Caller};
use crate::routes::contact::ListParams;
use crate::state::AppState;

/// `GET /audit`
pub async fn list_audit(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<ApiJson<Vec<AuditEntry>>, ApiError> {
    let filter = AuditFilter {
        user_id: Some(user_id),
        limit: Some(params.limit.unwrap_or_else(|| state.default_limit())),
        ..AuditFilter::default()
    };
    let entries = state.service().await.query_audit(&filter).await?;
    Ok(ApiJson(entries))
}
