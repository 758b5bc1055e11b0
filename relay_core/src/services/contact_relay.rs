//! Two-step contact relay: owner notification, then visitor confirmation.
//!
//! The steps are not atomic. A failed confirmation leaves the notification
//! delivered; the caller still sees a failure and the log records that the
//! owner was notified.

use crate::{
    config::MailConfig,
    error::{AppError, Result},
    mail::{templates, MailError, Mailer, OutboundEmail},
    models::ContactSubmission,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub sender: String,
    pub owner_address: String,
    pub team_name: String,
    pub response_days: u32,
    pub send_timeout: Duration,
}

impl From<&MailConfig> for RelaySettings {
    fn from(config: &MailConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            owner_address: config.owner_address.clone(),
            team_name: config.team_name.clone(),
            response_days: config.response_days,
            send_timeout: config.send_timeout(),
        }
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::from(&MailConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStep {
    Notification,
    Confirmation,
}

impl fmt::Display for RelayStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayStep::Notification => write!(f, "notification"),
            RelayStep::Confirmation => write!(f, "confirmation"),
        }
    }
}

#[derive(Debug, Error)]
#[error("{step} email failed: {source}")]
pub struct RelayError {
    pub step: RelayStep,
    /// True when the owner notification went out before the failure.
    pub owner_notified: bool,
    #[source]
    pub source: MailError,
}

impl RelayError {
    pub fn is_partial_delivery(&self) -> bool {
        self.owner_notified
    }
}

#[derive(Clone)]
pub struct ContactRelay {
    mailer: Arc<dyn Mailer>,
    settings: RelaySettings,
}

impl ContactRelay {
    pub fn new(mailer: Arc<dyn Mailer>, settings: RelaySettings) -> Self {
        Self { mailer, settings }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    pub fn transport_name(&self) -> &'static str {
        self.mailer.name()
    }

    pub fn notification_email(&self, submission: &ContactSubmission) -> OutboundEmail {
        templates::notification(
            &self.settings.sender,
            &self.settings.owner_address,
            submission,
        )
    }

    pub fn confirmation_email(&self, submission: &ContactSubmission) -> OutboundEmail {
        templates::confirmation(
            &self.settings.sender,
            submission,
            &self.settings.team_name,
            self.settings.response_days,
        )
    }

    /// Validates the submission in full, then relays it.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<()> {
        let span = info_span!("contact_submission", submission_id = %Uuid::new_v4());

        async move {
            debug!("validating submission");
            let validation = submission.check();
            if !validation.is_valid {
                let fields: Vec<&String> = validation.errors.keys().collect();
                warn!(fields = ?fields, "Rejected invalid submission");
                return Err(AppError::Validation(validation));
            }

            self.relay(submission).await?;
            Ok::<(), AppError>(())
        }
        .instrument(span)
        .await
    }

    /// Sends the notification, then the confirmation. The confirmation is
    /// only attempted once the notification has been accepted.
    pub async fn relay(
        &self,
        submission: &ContactSubmission,
    ) -> std::result::Result<(), RelayError> {
        self.send_notification(submission).await?;

        if let Err(mut err) = self.send_confirmation(submission).await {
            err.owner_notified = true;
            return Err(err);
        }

        info!("contact submission relayed");
        Ok(())
    }

    pub async fn send_notification(
        &self,
        submission: &ContactSubmission,
    ) -> std::result::Result<(), RelayError> {
        debug!("sending notification");
        let email = self.notification_email(submission);
        self.deliver(RelayStep::Notification, &email).await
    }

    pub async fn send_confirmation(
        &self,
        submission: &ContactSubmission,
    ) -> std::result::Result<(), RelayError> {
        debug!("sending confirmation");
        let email = self.confirmation_email(submission);
        self.deliver(RelayStep::Confirmation, &email).await
    }

    async fn deliver(
        &self,
        step: RelayStep,
        email: &OutboundEmail,
    ) -> std::result::Result<(), RelayError> {
        let timeout = self.settings.send_timeout;

        let outcome = match tokio::time::timeout(timeout, self.mailer.send(email)).await {
            Ok(result) => result,
            Err(_) => Err(MailError::Timeout(timeout)),
        };

        outcome.map_err(|source| {
            error!(
                step = %step,
                transport = self.mailer.name(),
                error = %source,
                "Email send failed"
            );
            RelayError {
                step,
                owner_notified: false,
                source,
            }
        })
    }
}
