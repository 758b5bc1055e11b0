//! Contact form state

use super::{ContactApi, SubmitError};
use crate::models::{ContactResponse, ContactSubmission};
use crate::validation::ValidationResult;
use tracing::{debug, info, warn};

pub const SUCCESS_NOTICE: &str =
    "Message envoyé avec succès ! Je vous répondrai dans les plus brefs délais.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Values, field errors and submit state of one contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    values: ContactSubmission,
    errors: ValidationResult,
    status: SubmitStatus,
    status_message: Option<String>,
    submitting: bool,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            values: ContactSubmission::default(),
            errors: ValidationResult::success(),
            status: SubmitStatus::Idle,
            status_message: None,
            submitting: false,
        }
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates one field. Once a submit attempt has surfaced errors, every
    /// change re-runs validation so messages disappear as fields are fixed.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.values.name = value,
            ContactField::Email => self.values.email = value,
            ContactField::Subject => self.values.subject = value,
            ContactField::Message => self.values.message = value,
        }

        if !self.errors.is_valid {
            self.errors = self.values.check();
        }
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.values.name,
            ContactField::Email => &self.values.email,
            ContactField::Subject => &self.values.subject,
            ContactField::Message => &self.values.message,
        }
    }

    pub fn field_error(&self, field: ContactField) -> Option<&str> {
        self.errors.first_error(field.as_str())
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    /// Validates and, when everything passes, marks the form in flight and
    /// hands back the payload to send. Returns `None` while a submission is
    /// already in flight or when any field is invalid.
    pub fn begin_submission(&mut self) -> Option<ContactSubmission> {
        if self.submitting {
            debug!("Submission already in flight");
            return None;
        }

        self.errors = self.values.check();
        if !self.errors.is_valid {
            debug!("Contact form has invalid fields");
            return None;
        }

        self.status = SubmitStatus::Idle;
        self.status_message = None;
        self.submitting = true;
        Some(self.values.clone())
    }

    pub fn complete_submission(&mut self, result: Result<ContactResponse, SubmitError>) {
        self.submitting = false;

        match result {
            Ok(_) => {
                info!("Contact form sent");
                self.values = ContactSubmission::default();
                self.errors = ValidationResult::success();
                self.status = SubmitStatus::Success;
                self.status_message = Some(SUCCESS_NOTICE.to_string());
            }
            Err(err) => {
                warn!(kind = ?err.kind, status = ?err.status, "Contact form submission failed");
                self.status = SubmitStatus::Error;
                self.status_message = Some(err.user_message());
            }
        }
    }

    /// Runs one full submit: validate, one request, record the outcome.
    pub async fn submit<A>(&mut self, api: &A) -> SubmitStatus
    where
        A: ContactApi + ?Sized,
    {
        let Some(submission) = self.begin_submission() else {
            return self.status;
        };

        let result = api.submit(&submission).await;
        self.complete_submission(result);
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct FakeApi {
        requests: Mutex<Vec<ContactSubmission>>,
        result: Result<ContactResponse, SubmitError>,
    }

    impl FakeApi {
        fn answering(result: Result<ContactResponse, SubmitError>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                result,
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().len()
        }
    }

    #[async_trait]
    impl ContactApi for FakeApi {
        async fn submit(
            &self,
            submission: &ContactSubmission,
        ) -> Result<ContactResponse, SubmitError> {
            self.requests.lock().push(submission.clone());
            self.result.clone()
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(ContactField::Name, "Alice");
        form.set(ContactField::Email, "alice@example.com");
        form.set(ContactField::Subject, "Projet mobile");
        form.set(
            ContactField::Message,
            "Bonjour, je voudrais discuter d'un projet mobile pour mon entreprise.",
        );
        form
    }

    #[tokio::test]
    async fn test_invalid_fields_issue_no_request() {
        let api = FakeApi::answering(Ok(ContactResponse::sent()));
        let mut form = filled_form();
        form.set(ContactField::Email, "alice.example.com");
        form.set(ContactField::Name, "A");

        let status = form.submit(&api).await;

        assert_eq!(status, SubmitStatus::Idle);
        assert_eq!(api.request_count(), 0);
        assert_eq!(form.field_error(ContactField::Email), Some("Adresse email invalide"));
        assert_eq!(
            form.field_error(ContactField::Name),
            Some("Le nom doit contenir au moins 2 caractères")
        );
        assert_eq!(form.field_error(ContactField::Subject), None);
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_message_boundary() {
        let api = FakeApi::answering(Ok(ContactResponse::sent()));
        let mut form = filled_form();

        form.set(ContactField::Message, "m".repeat(19));
        form.submit(&api).await;
        assert_eq!(api.request_count(), 0);
        assert!(form.field_error(ContactField::Message).is_some());

        form.set(ContactField::Message, "m".repeat(20));
        assert!(form.field_error(ContactField::Message).is_none());
        form.submit(&api).await;
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_success_sends_once_and_clears() {
        let api = FakeApi::answering(Ok(ContactResponse::sent()));
        let mut form = filled_form();
        let expected = ContactSubmission::new(
            "Alice",
            "alice@example.com",
            "Projet mobile",
            "Bonjour, je voudrais discuter d'un projet mobile pour mon entreprise.",
        );

        let status = form.submit(&api).await;

        assert_eq!(status, SubmitStatus::Success);
        assert_eq!(*api.requests.lock(), vec![expected]);
        assert_eq!(form.status_message(), Some(SUCCESS_NOTICE));
        for field in ContactField::ALL {
            assert_eq!(form.value(field), "");
        }
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_failure_keeps_values() {
        let api = FakeApi::answering(Err(SubmitError::status(
            500,
            Some("Internal Server Error".to_string()),
            Some("Erreur lors de l'envoi".to_string()),
        )));
        let mut form = filled_form();

        let status = form.submit(&api).await;

        assert_eq!(status, SubmitStatus::Error);
        assert_eq!(form.value(ContactField::Name), "Alice");
        assert_eq!(form.value(ContactField::Email), "alice@example.com");
        let message = form.status_message().unwrap();
        assert!(message.contains("(Status: 500)"));
        assert!(message.contains("Erreur lors de l'envoi"));
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_network_failure_keeps_values() {
        let api = FakeApi::answering(Err(SubmitError::network("connection refused")));
        let mut form = filled_form();

        assert_eq!(form.submit(&api).await, SubmitStatus::Error);
        assert_eq!(form.value(ContactField::Subject), "Projet mobile");
        assert!(form.status_message().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_in_flight_blocks_duplicate() {
        let mut form = filled_form();

        assert!(form.begin_submission().is_some());
        assert!(form.is_submitting());
        assert!(!form.can_submit());
        assert!(form.begin_submission().is_none());

        form.complete_submission(Ok(ContactResponse::sent()));
        assert!(form.can_submit());
    }

    #[test]
    fn test_new_attempt_resets_status() {
        let mut form = filled_form();
        assert!(form.begin_submission().is_some());
        form.complete_submission(Err(SubmitError::network("offline")));
        assert_eq!(form.status(), SubmitStatus::Error);

        assert!(form.begin_submission().is_some());
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(form.status_message(), None);
    }
}
