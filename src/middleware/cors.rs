use std::time::Duration;

use axum::http::{header, HeaderValue};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};
use tracing::warn;

use crate::config::ServerConfig;

/// CORS for the configured frontend origins.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// request instead of using `*`.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers(ExposeHeaders::list([header::CONTENT_TYPE]))
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
