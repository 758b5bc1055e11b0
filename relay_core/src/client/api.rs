//! HTTP implementation of [`ContactApi`]

use super::{ContactApi, SubmitError};
use crate::models::{ContactResponse, ContactSubmission};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on one submission, connect to last body byte.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpContactApi {
    /// `base_url` is the site origin, e.g. `https://example.com`.
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// A relay that does not answer within `timeout` is reported as a
    /// network failure.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::network(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn submit(&self, submission: &ContactSubmission) -> Result<ContactResponse, SubmitError> {
        debug!(endpoint = %self.endpoint, "Submitting contact form");

        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|e| SubmitError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::network(e.to_string()))?;
        let parsed = serde_json::from_str::<ContactResponse>(&body).ok();

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Contact relay answered with an error status");
            return Err(SubmitError::status(
                status.as_u16(),
                status.canonical_reason().map(str::to_string),
                parsed.map(|response| response.message),
            ));
        }

        parsed.ok_or_else(|| {
            SubmitError::malformed(status.as_u16(), "Réponse du serveur illisible")
        })
    }
}
