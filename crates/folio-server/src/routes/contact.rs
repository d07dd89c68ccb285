use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use folio_core::entities::ContactMessage;
use folio_core::inputs::NewContactMessage;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, Caller};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

/// `POST /users/:handle/contact`
pub async fn create_message(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
    ApiJson(input): ApiJson<NewContactMessage>,
) -> Result<(StatusCode, ApiJson<ContactMessage>), ApiError> {
    let svc = state.service().await;
    let recipient = svc.find_user_by_handle(&handle).await?;
    let message = svc.create_contact_message(&recipient.id, &input).await?;
    Ok((StatusCode::CREATED, ApiJson(message)))
}

/// `GET /contact`
pub async fn list_messages(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<ApiJson<Vec<ContactMessage>>, ApiError> {
    let limit = params.limit.unwrap_or_else(|| state.default_limit());
    let messages = state
        .service()
        .await
        .list_contact_messages(&user_id, limit)
        .await?;
    Ok(ApiJson(messages))
}
