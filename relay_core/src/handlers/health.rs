//! Liveness endpoint

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "app": state.app_name,
        "version": state.version,
        "transport": state.relay.transport_name(),
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}
