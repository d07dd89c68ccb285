//! CORS layer built from `[cors]` configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

use folio_config::CorsConfig;

use crate::extract::CALLER_HEADER;

/// Build the CORS layer for `origins` (already merged with `FRONTEND_URL`).
///
/// `"*"` allows any origin; credentials are then switched off because
/// browsers reject a wildcard origin with credentials.
#[must_use]
pub fn cors_layer(config: &CorsConfig, origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(CALLER_HEADER),
        ])
        .max_age(Duration::from_secs(config.max_age_secs));

    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
        .allow_credentials(config.allow_credentials)
}
