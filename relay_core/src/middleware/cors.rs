//! CORS (Cross-Origin Resource Sharing) middleware configuration

use crate::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Any origin when none are configured, the listed origins otherwise.
pub fn cors_layer_from_config(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return cors_layer_permissive(config.max_age_seconds);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .max_age(Duration::from_secs(config.max_age_seconds))
}

pub fn cors_layer_permissive(max_age_seconds: u64) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(max_age_seconds))
}
