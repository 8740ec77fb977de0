use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_contracts::SubmitOutcome;
use folio_core_contact_impl::{flow::ContactSubmissionFlow, sender::ApiMailSender};
use folio_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use folio_models::contact::{ContactFormErrors, ContactFormFields};
use tracing::info;
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit the contact form of a running folio server
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Root url of the server, defaults to `api.url` from the config
        #[arg(long)]
        url: Option<Url>,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                message,
                url,
            } => {
                let url = url.unwrap_or(config.api.url);
                send(
                    &url,
                    ContactFormFields {
                        name,
                        email,
                        message,
                    },
                )
                .await
            }
        }
    }
}

/// Submit the form and log its states.
///
/// The watcher only sees the latest state, so a short `Pending` may be
/// coalesced into the result. The outcome is always logged.
async fn send(url: &Url, fields: ContactFormFields) -> anyhow::Result<()> {
    let api = ContactApiServiceImpl::new(ContactApiServiceConfig::new(url)?)?;
    let flow = Arc::new(ContactSubmissionFlow::new(ApiMailSender::new(api)));
    flow.set_fields(fields);

    let mut form = flow.subscribe();
    form.mark_unchanged();
    let watcher = tokio::spawn(async move {
        while form.changed().await.is_ok() {
            let state = form.borrow_and_update().state.clone();
            info!(?state, "contact form changed");
        }
    });

    let outcome = flow
        .spawn_submit()
        .await
        .context("Contact submission panicked")?;
    let state = flow.state();
    drop(flow);
    watcher.await.context("Contact form watcher panicked")?;
    info!(?state, ?outcome, "contact submission finished");

    match outcome {
        SubmitOutcome::Succeeded => {
            info!("Message sent to {url}");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => bail!("Invalid contact form: {}", describe(&errors)),
        SubmitOutcome::Failed(reason) => bail!("Could not send message: {reason}"),
        SubmitOutcome::Ignored => bail!("Another submission is still pending"),
    }
}

fn describe(errors: &ContactFormErrors) -> String {
    [
        ("name", errors.name),
        ("email", errors.email),
        ("message", errors.message),
    ]
    .into_iter()
    .filter_map(|(field, error)| Some(format!("{field}: {}", error?)))
    .collect::<Vec<_>>()
    .join(", ")
}
