use axum::extract::State;
use axum::http::StatusCode;

use folio_core::entities::PortfolioItem;
use folio_core::inputs::NewPortfolioItem;
use folio_db::updates::portfolio::PortfolioItemUpdate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, Caller};
use crate::state::AppState;

/// `GET /users/:handle/portfolio`
pub async fn list_items(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
) -> Result<ApiJson<Vec<PortfolioItem>>, ApiError> {
    let items = state
        .service()
        .await
        .list_portfolio_by_handle(&handle)
        .await?;
    Ok(ApiJson(items))
}

/// `POST /portfolio`
pub async fn create_item(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiJson(input): ApiJson<NewPortfolioItem>,
) -> Result<(StatusCode, ApiJson<PortfolioItem>), ApiError> {
    let item = state
        .service()
        .await
        .create_portfolio_item(&user_id, &input)
        .await?;
    Ok((StatusCode::CREATED, ApiJson(item)))
}

/// `PATCH /portfolio/:id`
pub async fn update_item(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<PortfolioItemUpdate>,
) -> Result<ApiJson<PortfolioItem>, ApiError> {
    let item = state
        .service()
        .await
        .update_portfolio_item(&user_id, &id, &update)
        .await?;
    Ok(ApiJson(item))
}

/// `DELETE /portfolio/:id`
pub async fn delete_item(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    state
        .service()
        .await
        .delete_portfolio_item(&user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
