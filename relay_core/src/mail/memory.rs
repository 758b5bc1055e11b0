//! In-memory transport

use super::{MailError, Mailer, OutboundEmail};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Records every message instead of delivering it.
///
/// Clones share the same outbox, so a test can keep one handle and give
/// another to the application state.
#[derive(Clone, Default)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<Vec<OutboundEmail>>>,
    attempts: Arc<Mutex<usize>>,
    fail_on_attempt: Option<usize>,
    delay: Option<Duration>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `attempt`-th send (1-based) with a transport error.
    pub fn failing_on(attempt: usize) -> Self {
        Self {
            fail_on_attempt: Some(attempt),
            ..Self::default()
        }
    }

    /// Sleeps before every send.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.outbox.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.outbox.lock().len()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let attempt = {
            let mut attempts = self.attempts.lock();
            *attempts += 1;
            *attempts
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_on_attempt == Some(attempt) {
            return Err(MailError::Transport(format!(
                "memory transport configured to fail attempt {}",
                attempt
            )));
        }

        info!(to = %email.to, subject = %email.subject, "Recorded outbound email");
        self.outbox.lock().push(email.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
