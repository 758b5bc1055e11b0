//! `/api/contact` handlers

use crate::{
    error::{AppError, Result},
    extractors::ContactJson,
    models::{ContactResponse, ContactSubmission},
    AppState,
};
use axum::{extract::State, http::Method, response::IntoResponse, Json};
use tracing::{info, warn};

pub async fn handle_contact(
    State(state): State<AppState>,
    ContactJson(submission): ContactJson<ContactSubmission>,
) -> Result<impl IntoResponse> {
    info!("POST /api/contact - from: {}", submission.email);

    state.relay.submit(&submission).await?;

    Ok(Json(ContactResponse::sent()))
}

pub async fn handle_method_not_allowed(method: Method) -> AppError {
    warn!("{} /api/contact - method not allowed", method);
    AppError::MethodNotAllowed
}
