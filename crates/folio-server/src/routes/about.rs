//! About section endpoints.

use axum::extract::State;

use folio_core::entities::About;
use folio_db::updates::about::AboutUpdate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, Caller};
use crate::state::AppState;

/// `GET /users/:handle/about`
pub async fn get_about(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
) -> Result<ApiJson<About>, ApiError> {
    let about = state.service().await.get_about_by_handle(&handle).await?;
    Ok(ApiJson(about))
}

/// `PATCH /about`
pub async fn update_about(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiJson(update): ApiJson<AboutUpdate>,
) -> Result<ApiJson<About>, ApiError> {
    let about = state
        .service()
        .await
        .update_about(&user_id, &update)
        .await?;
    Ok(ApiJson(about))
}
