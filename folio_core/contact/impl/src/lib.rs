use std::sync::Arc;

use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{contact::ContactFormInput, email_address::EmailAddressWithName};
use tracing::{info, warn};

pub mod flow;
pub mod sender;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub email: Arc<EmailAddressWithName>,
    pub subject_prefix: Arc<str>,
}

impl<Email> ContactFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(&self, input: ContactFormInput) -> Result<(), ContactSendMessageError> {
        let email = Email {
            recipient: (*self.config.email).clone(),
            subject: format!("{} Message from {}", self.config.subject_prefix, *input.name),
            body: format!(
                "Message from {} ({}):\n\n{}",
                *input.name, input.email, *input.message
            ),
            content_type: ContentType::Text,
            reply_to: Some(input.email.clone().with_name((*input.name).clone())),
        };

        if !self.email.send(email).await? {
            warn!(sender = %input.email, "contact message was rejected by the smtp server");
            return Err(ContactSendMessageError::Send);
        }

        info!(sender = %input.email, "contact message delivered");

        Ok(())
    }
}
