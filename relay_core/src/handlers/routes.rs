//! Route table

use super::{contact, health};
use crate::{config::StaticFilesConfig, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::handle_health))
        .route(
            "/api/contact",
            post(contact::handle_contact).fallback(contact::handle_method_not_allowed),
        )
}

/// Serves built assets, answering unknown paths with the SPA entry document.
pub fn spa_service(config: &StaticFilesConfig) -> ServeDir<ServeFile> {
    ServeDir::new(&config.dir).fallback(ServeFile::new(config.index_path()))
}
