use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A validated contact form submission.
///
/// A fresh value is built from [`ContactFormFields`] on every submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormInput {
    pub name: ContactName,
    pub email: EmailAddress,
    pub message: ContactMessageContent,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// The raw text currently entered into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Field-level validation errors of a contact form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFormErrors {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub message: Option<FieldError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please fill out this field.")]
    Required,
    #[error("This field is too long.")]
    TooLong,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// The lifecycle state of a single contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether a result is being shown that can be dismissed.
    pub fn has_result(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

impl ContactFormFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    /// Validate the fields and build the submission input.
    pub fn validate(&self) -> Result<ContactFormInput, ContactFormErrors> {
        let name = required(&self.name).and_then(|name| {
            ContactName::try_new(name).map_err(|_| FieldError::TooLong)
        });
        let email = required(&self.email)
            .and_then(|email| email.parse::<EmailAddress>().map_err(|_| FieldError::InvalidEmail));
        let message = required(&self.message).and_then(|message| {
            ContactMessageContent::try_new(message).map_err(|_| FieldError::TooLong)
        });

        match (name, email, message) {
            (Ok(name), Ok(email), Ok(message)) => Ok(ContactFormInput {
                name,
                email,
                message,
            }),
            (name, email, message) => Err(ContactFormErrors {
                name: name.err(),
                email: email.err(),
                message: message.err(),
            }),
        }
    }
}

impl ContactFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

impl From<ContactFormInput> for ContactFormFields {
    fn from(value: ContactFormInput) -> Self {
        Self {
            name: value.name.into_inner(),
            email: value.email.to_string(),
            message: value.message.into_inner(),
        }
    }
}

fn required(value: &str) -> Result<&str, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(value)
    }
}
