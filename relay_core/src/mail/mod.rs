//! Outbound email transport.
//!
//! The relay only sees the [`Mailer`] trait. [`SmtpMailer`] delivers through
//! an SMTP relay (Gmail by default) and [`MemoryMailer`] keeps messages in
//! memory, which is what local development and the tests run against.

pub mod memory;
pub mod smtp;
pub mod templates;

pub use memory::MemoryMailer;
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{MailConfig, MailTransportKind};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("send timed out after {0:?}")]
    Timeout(Duration),
}

impl MailError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, MailError::Timeout(_))
    }
}

/// A fully rendered message, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;

    /// Short transport name for logs and the health endpoint.
    fn name(&self) -> &'static str;
}

/// Builds the transport selected by `mail.transport`.
pub fn mailer_from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.transport {
        MailTransportKind::Smtp => Ok(Arc::new(SmtpMailer::from_config(config)?)),
        MailTransportKind::Memory => Ok(Arc::new(MemoryMailer::new())),
    }
}
