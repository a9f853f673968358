use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{ContactMessage, FormField};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields (Name, Email, Subject, Message)")]
    MissingRequired { fields: Vec<FormField> },
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Accepts the `local@domain.tld` shape and nothing looser.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks a collected submission before anything goes on the wire.
pub fn validate_contact(message: &ContactMessage) -> Result<(), ValidationError> {
    let missing: Vec<FormField> = FormField::REQUIRED
        .into_iter()
        .filter(|field| message.get(*field).trim().is_empty())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequired { fields: missing });
    }
    if !is_valid_email(message.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}
