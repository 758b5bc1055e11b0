//! Contact form client: field validation, submit gating and the request
//! to `/api/contact`.

pub mod api;
pub mod form;

pub use api::HttpContactApi;
pub use form::{ContactField, ContactForm, SubmitStatus, SUCCESS_NOTICE};

use crate::models::{ContactResponse, ContactSubmission};
use async_trait::async_trait;
use std::fmt;

const ERROR_PREFIX: &str = "Une erreur est survenue lors de l'envoi.";
const ERROR_SUFFIX: &str = " Veuillez réessayer ou me contacter directement par email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitErrorKind {
    /// The relay answered with something other than 200.
    Status,
    /// No response: connection refused, DNS, reset, timeout.
    Network,
    /// A 200 whose body is not a relay response.
    MalformedResponse,
}

/// Why a submission failed, decided where the response is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub kind: SubmitErrorKind,
    pub status: Option<u16>,
    pub text: Option<String>,
    pub message: Option<String>,
}

impl SubmitError {
    pub fn status(status: u16, text: Option<String>, message: Option<String>) -> Self {
        Self {
            kind: SubmitErrorKind::Status,
            status: Some(status),
            text,
            message,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: SubmitErrorKind::Network,
            status: None,
            text: None,
            message: Some(message.into()),
        }
    }

    pub fn malformed(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: SubmitErrorKind::MalformedResponse,
            status: Some(status),
            text: None,
            message: Some(message.into()),
        }
    }

    /// The text shown under the form, built from whichever details exist.
    pub fn user_message(&self) -> String {
        let mut out = String::from(ERROR_PREFIX);

        if let Some(status) = self.status {
            out.push_str(&format!(" (Status: {})", status));
        }
        if let Some(text) = &self.text {
            out.push_str(&format!(" - {}", text));
        }
        if let Some(message) = &self.message {
            out.push_str(&format!(" - {}", message));
        }

        out.push_str(ERROR_SUFFIX);
        out
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for SubmitError {}

/// Sends one submission to the relay. Implementations never retry.
#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit(&self, submission: &ContactSubmission) -> Result<ContactResponse, SubmitError>;
}
