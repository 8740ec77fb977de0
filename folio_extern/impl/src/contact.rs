use std::sync::Arc;

use anyhow::Context;
use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_models::contact::ContactFormInput;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

const SUCCESS_MESSAGE: &str = "success";

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    endpoint: Arc<Url>,
}

impl ContactApiServiceConfig {
    /// `base_url` is the root url of the folio server.
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let endpoint = base_url
            .join("api/contact")
            .with_context(|| format!("Invalid api url {base_url}"))?;
        Ok(Self {
            endpoint: endpoint.into(),
        })
    }
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new().context("Failed to create http client")?;
        Ok(Self { config, client })
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn send_message(&self, input: &ContactFormInput) -> anyhow::Result<ContactApiResponse> {
        debug!(endpoint = %self.config.endpoint, "posting contact message");

        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&ContactRequest {
                name: &input.name,
                email: input.email.as_str(),
                message: &input.message,
            })
            .send()
            .await?;

        if response.status().is_success() {
            let SuccessResponse { message } = response.json().await?;
            return Ok(if message == SUCCESS_MESSAGE {
                ContactApiResponse::Sent
            } else {
                ContactApiResponse::Rejected(message)
            });
        }

        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse { detail }) => Ok(ContactApiResponse::Rejected(detail)),
            Err(err) => Err(anyhow::Error::from(err)
                .context(format!("Unexpected response from contact endpoint ({status})"))),
        }
    }
}

#[derive(Serialize)]
struct ContactRequest<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct SuccessResponse {
    message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    detail: String,
}
