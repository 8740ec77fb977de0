use std::collections::BTreeMap;

use folio_core_contact_contracts::ContactForm;
use folio_models::contact::{ContactFormErrors, SubmissionState};
use folio_templates_contracts::{ContactSectionTemplate, ContactStatus};
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiContactResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ApiContactValidationError {
    pub detail: &'static str,
    pub errors: BTreeMap<&'static str, String>,
}

impl From<ContactFormErrors> for ApiContactValidationError {
    fn from(value: ContactFormErrors) -> Self {
        let errors = [
            ("name", value.name),
            ("email", value.email),
            ("message", value.message),
        ]
        .into_iter()
        .filter_map(|(field, error)| Some((field, error?.to_string())))
        .collect();

        Self {
            detail: "Invalid contact form",
            errors,
        }
    }
}

/// The contact section of the page as seen by the user.
pub fn contact_section(form: &ContactForm) -> ContactSectionTemplate {
    let (status, error) = match &form.state {
        SubmissionState::Idle => (ContactStatus::Idle, None),
        SubmissionState::Pending => (ContactStatus::Pending, None),
        SubmissionState::Succeeded => (ContactStatus::Succeeded, None),
        SubmissionState::Failed(reason) => (ContactStatus::Failed, Some(reason.clone())),
    };

    ContactSectionTemplate {
        name: form.fields.name.clone(),
        email: form.fields.email.clone(),
        message: form.fields.message.clone(),
        status,
        error,
        name_error: form.errors.name.map(|x| x.to_string()),
        email_error: form.errors.email.map(|x| x.to_string()),
        message_error: form.errors.message.map(|x| x.to_string()),
        submit_enabled: form.can_submit(),
    }
}

#[cfg(test)]
mod tests {
    use folio_models::contact::{ContactFormFields, FieldError};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn failed_form() {
        // Arrange
        let form = ContactForm {
            fields: ContactFormFields {
                name: "Jane".into(),
                email: "jane@example.com".into(),
                message: "Hi".into(),
            },
            errors: Default::default(),
            state: SubmissionState::Failed("rate limited".into()),
        };

        // Act
        let result = contact_section(&form);

        // Assert
        assert_eq!(
            result,
            ContactSectionTemplate {
                name: "Jane".into(),
                email: "jane@example.com".into(),
                message: "Hi".into(),
                status: ContactStatus::Failed,
                error: Some("rate limited".into()),
                name_error: None,
                email_error: None,
                message_error: None,
                submit_enabled: true,
            }
        );
    }

    #[test]
    fn pending_form_cannot_be_submitted() {
        let form = ContactForm {
            state: SubmissionState::Pending,
            ..Default::default()
        };

        let result = contact_section(&form);

        assert_eq!(result.status, ContactStatus::Pending);
        assert!(!result.submit_enabled);
    }

    #[test]
    fn validation_errors() {
        let errors = ContactFormErrors {
            email: Some(FieldError::InvalidEmail),
            message: Some(FieldError::Required),
            ..Default::default()
        };

        let result = ApiContactValidationError::from(errors);

        assert_eq!(
            result.errors,
            BTreeMap::from([
                ("email", "Please enter a valid email address.".into()),
                ("message", "Please fill out this field.".into()),
            ])
        );
    }
}
