//! [`MailSender`] implementations used by the contact form surfaces.

use std::sync::Arc;

use folio_core_contact_contracts::{
    ContactFeatureService, ContactSendMessageError, MailSender, SendFailure,
};
use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_models::contact::ContactFormInput;
use tracing::error;

pub const COULD_NOT_SEND_MESSAGE: &str = "Could not send message";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Delivers submissions through the contact feature of this process.
#[derive(Debug)]
pub struct ServiceMailSender<Contact>(Arc<Contact>);

impl<Contact> ServiceMailSender<Contact> {
    pub fn new(contact: Arc<Contact>) -> Self {
        Self(contact)
    }
}

impl<Contact> MailSender for ServiceMailSender<Contact>
where
    Contact: ContactFeatureService,
{
    async fn send(&self, input: &ContactFormInput) -> Result<(), SendFailure> {
        match self.0.send_message(input.clone()).await {
            Ok(()) => Ok(()),
            Err(ContactSendMessageError::Send) => Err(COULD_NOT_SEND_MESSAGE.into()),
            Err(ContactSendMessageError::Other(err)) => {
                error!("failed to send contact message: {err:#}");
                Err(INTERNAL_SERVER_ERROR.into())
            }
        }
    }
}

/// Delivers submissions to the contact endpoint of a remote folio server.
#[derive(Debug)]
pub struct ApiMailSender<Api>(Api);

impl<Api> ApiMailSender<Api> {
    pub fn new(api: Api) -> Self {
        Self(api)
    }
}

impl<Api> MailSender for ApiMailSender<Api>
where
    Api: ContactApiService,
{
    async fn send(&self, input: &ContactFormInput) -> Result<(), SendFailure> {
        match self.0.send_message(input).await {
            Ok(ContactApiResponse::Sent) => Ok(()),
            Ok(ContactApiResponse::Rejected(detail)) => Err(SendFailure(detail)),
            Err(err) => {
                error!("failed to reach contact api: {err:#}");
                Err(SendFailure(format!("{err:#}")))
            }
        }
    }
}
