//! Field validation shared by the relay endpoint and the form client

pub mod rules;

pub use rules::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

/// Outcome of validating a payload, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut result = Self::success();

        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Validation failed for field '{}'", field),
                };
                result.add_error(&field, &message);
            }
        }

        result
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for `field`, the one a form shows under the input.
    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.field_errors(field).first().map(String::as_str)
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }

        for (field, errors) in other.errors {
            self.errors.entry(field).or_default().extend(errors);
        }
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

impl<T> Validatable for T
where
    T: Validate,
{
    fn validate_comprehensive(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => ValidationResult::from_validation_errors(errors),
        }
    }
}
