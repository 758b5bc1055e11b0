//! SMTP transport backed by lettre

use super::{MailError, Mailer, OutboundEmail};
use crate::config::{MailConfig, SmtpSecurity};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    /// Builds the transport once; connections are opened lazily on send.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let builder = match config.smtp_security {
            SmtpSecurity::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                    .map_err(|e| MailError::Transport(e.to_string()))?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailError::Transport(e.to_string()))?,
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.smtp_host.as_str())
            }
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(config.send_timeout()));

        if !config.password.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.login().to_string(),
                config.password.expose().to_string(),
            ));
        }

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            security = ?config.smtp_security,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
            host: config.smtp_host.clone(),
        })
    }
}

pub(crate) fn build_message(email: &OutboundEmail) -> Result<Message, MailError> {
    let from = parse_mailbox(&email.from)?;
    let to = parse_mailbox(&email.to)?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress(format!("{} ({})", address, e)))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = build_message(email)?;

        debug!(host = %self.host, to = %email.to, "Sending email over SMTP");

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
