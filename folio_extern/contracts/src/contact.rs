use std::future::Future;

use folio_models::contact::ContactFormInput;

/// Client for the contact endpoint of a running folio server.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    fn send_message(
        &self,
        input: &ContactFormInput,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactApiResponse {
    Sent,
    /// The server answered with an error detail.
    Rejected(String),
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_send_message(mut self, input: ContactFormInput, result: ContactApiResponse) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_message_error(mut self, input: ContactFormInput, error: &'static str) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }
}
