//! Validation rules and custom validators

use lazy_static::lazy_static;
use lettre::Address;
use regex::Regex;
use validator::ValidationError;

pub const NAME_MIN_CHARS: u64 = 2;
pub const SUBJECT_MIN_CHARS: u64 = 5;
pub const MESSAGE_MIN_CHARS: u64 = 20;
pub const EMAIL_MAX_CHARS: usize = 254;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email_empty"));
    }

    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err(ValidationError::new("email_too_long"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("email_format"));
    }

    // The regex alone admits dot and hyphen placements lettre refuses.
    if email.parse::<Address>().is_err() {
        return Err(ValidationError::new("email_format"));
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}
