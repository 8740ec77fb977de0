use std::future::Future;

use folio_models::contact::{
    ContactFormErrors, ContactFormFields, ContactFormInput, SubmissionState,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Deliver a contact form message to the site owner's inbox.
    fn send_message(
        &self,
        input: ContactFormInput,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The capability a contact form uses to deliver its submissions.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MailSender: Send + Sync + 'static {
    fn send(&self, input: &ContactFormInput) -> impl Future<Output = Result<(), SendFailure>> + Send;
}

/// A human readable reason why a message could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SendFailure(pub String);

impl From<&str> for SendFailure {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

/// Everything a user sees of one contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactFormFields,
    pub errors: ContactFormErrors,
    pub state: SubmissionState,
}

impl ContactForm {
    /// The submit control is disabled while a message is in flight.
    pub fn can_submit(&self) -> bool {
        !self.state.is_pending()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission of the same form was still pending.
    Ignored,
    Invalid(ContactFormErrors),
    Succeeded,
    Failed(SendFailure),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        input: ContactFormInput,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

#[cfg(feature = "mock")]
impl MockMailSender {
    pub fn with_send(mut self, input: ContactFormInput, result: Result<(), SendFailure>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
