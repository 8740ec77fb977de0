use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Form, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError, SubmitOutcome};
use folio_core_contact_impl::{
    flow::ContactSubmissionFlow,
    sender::{ServiceMailSender, COULD_NOT_SEND_MESSAGE},
};
use folio_models::contact::ContactFormFields;
use folio_templates_contracts::TemplateService;

use super::{error, internal_server_error, page::PageRenderer};
use crate::models::contact::{ApiContactResponse, ApiContactValidationError};

const INVALID_REQUEST_BODY: &str = "Invalid request body";

pub fn router<Contact, Template>(
    service: Arc<Contact>,
    page: PageRenderer<Template>,
) -> Router<()>
where
    Contact: ContactFeatureService,
    Template: TemplateService,
{
    Router::new()
        .route("/contact", routing::post(submit_form::<Contact, Template>))
        .route("/api/contact", routing::post(send_message::<Contact, Template>))
        .with_state(ContactState { service, page })
}

struct ContactState<Contact, Template> {
    service: Arc<Contact>,
    page: PageRenderer<Template>,
}

impl<Contact, Template> Clone for ContactState<Contact, Template> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            page: self.page.clone(),
        }
    }
}

async fn submit_form<Contact, Template>(
    State(state): State<ContactState<Contact, Template>>,
    Form(fields): Form<ContactFormFields>,
) -> Response
where
    Contact: ContactFeatureService,
    Template: TemplateService,
{
    let flow = ContactSubmissionFlow::new(ServiceMailSender::new(state.service));
    flow.set_fields(fields);

    let status = match flow.submit().await {
        SubmitOutcome::Succeeded => StatusCode::OK,
        SubmitOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SubmitOutcome::Ignored => StatusCode::CONFLICT,
    };

    state.page.render(status, &flow.snapshot())
}

async fn send_message<Contact, Template>(
    State(state): State<ContactState<Contact, Template>>,
    payload: Result<Json<ContactFormFields>, JsonRejection>,
) -> Response
where
    Contact: ContactFeatureService,
    Template: TemplateService,
{
    let Json(fields) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("rejected contact request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY);
        }
    };

    let input = match fields.validate() {
        Ok(input) => input,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiContactValidationError::from(errors)),
            )
                .into_response()
        }
    };

    match state.service.send_message(input).await {
        Ok(()) => Json(ApiContactResponse { message: "success" }).into_response(),
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, COULD_NOT_SEND_MESSAGE)
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
