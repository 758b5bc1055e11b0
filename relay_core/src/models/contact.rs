//! Contact form payload and relay response bodies

use crate::validation::{validate_email, Validatable, ValidationResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const SUCCESS_MESSAGE: &str = "Emails envoyés avec succès";
pub const FAILURE_MESSAGE: &str = "Erreur lors de l'envoi";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Méthode non autorisée";
pub const INVALID_SUBMISSION_MESSAGE: &str = "Formulaire invalide";

/// One contact form submission. Lives for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 2, message = "Le nom doit contenir au moins 2 caractères"))]
    pub name: String,

    #[validate(custom(function = "validate_email", message = "Adresse email invalide"))]
    pub email: String,

    #[validate(length(min = 5, message = "Le sujet doit contenir au moins 5 caractères"))]
    pub subject: String,

    #[validate(length(min = 20, message = "Le message doit contenir au moins 20 caractères"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Checks every field and reports all violations at once.
    pub fn check(&self) -> ValidationResult {
        self.validate_comprehensive()
    }
}

/// Body of both the 200 and the 500 relay responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodNotAllowedBody {
    pub error: String,
}

impl Default for MethodNotAllowedBody {
    fn default() -> Self {
        Self {
            error: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
        }
    }
}
