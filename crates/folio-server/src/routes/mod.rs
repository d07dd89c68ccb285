//! Route table.
//!
//! Public reads are keyed by handle (username, or email when it contains
//! `@`); every write acts on the caller identified by the `x-folio-user`
//! header.

pub mod about;
pub mod audit;
pub mod contact;
pub mod portfolio;
pub mod timeline;
pub mod users;

use axum::Router;
use axum::routing::{get, patch, post};
use serde::Serialize;

use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> ApiJson<Health> {
    ApiJson(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(users::create_user))
        .route("/users/:handle", get(users::get_user))
        .route("/profile", patch(users::update_profile))
        .route("/users/:handle/about", get(about::get_about))
        .route("/about", patch(about::update_about))
        .route("/users/:handle/educations", get(timeline::list_entries))
        .route("/educations", post(timeline::create_entry))
        .route("/educations/reorder", patch(timeline::reorder_entries))
        .route("/educations/compact", post(timeline::compact_category))
        .route("/educations/:id/move", post(timeline::move_entry))
        .route(
            "/educations/:id",
            patch(timeline::update_entry).delete(timeline::delete_entry),
        )
        .route("/users/:handle/portfolio", get(portfolio::list_items))
        .route("/portfolio", post(portfolio::create_item))
        .route(
            "/portfolio/:id",
            patch(portfolio::update_item).delete(portfolio::delete_item),
        )
        .route("/users/:handle/contact", post(contact::create_message))
        .route("/contact", get(contact::list_messages))
        .route("/audit", get(audit::list_audit))
}
