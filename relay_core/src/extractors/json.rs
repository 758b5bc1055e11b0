//! JSON extractor whose rejections use the relay's response shape

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

pub struct ContactJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ContactJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ContactJson(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest(rejection_message(&rejection).to_string()))
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
        JsonRejection::JsonSyntaxError(_) => "Invalid JSON format",
        JsonRejection::JsonDataError(_) => "Missing or invalid contact fields",
        JsonRejection::BytesRejection(_) => "Failed to read request body",
        _ => "Failed to parse JSON request",
    }
}
