use axum::extract::State;
use axum::http::StatusCode;

use folio_core::entities::User;
use folio_core::inputs::NewUser;
use folio_db::updates::profile::ProfileUpdate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, Caller};
use crate::state::AppState;

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewUser>,
) -> Result<(StatusCode, ApiJson<User>), ApiError> {
    let user = state.service().await.create_user(&input).await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, ApiJson(user)))
}

/// `GET /users/:handle`
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
) -> Result<ApiJson<User>, ApiError> {
    let user = state.service().await.find_user_by_handle(&handle).await?;
    Ok(ApiJson(user))
}

/// `PATCH /profile`
pub async fn update_profile(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<ApiJson<User>, ApiError> {
    let user = state
        .service()
        .await
        .update_profile(&user_id, &update)
        .await?;
    Ok(ApiJson(user))
}
