use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing, Router,
};
use chrono::{Datelike, Utc};
use folio_core_contact_contracts::ContactForm;
use folio_models::profile::Profile;
use folio_templates_contracts::{PortfolioPageTemplate, TemplateService};

use super::internal_server_error;
use crate::models::contact::contact_section;

pub fn router<Template: TemplateService>(page: PageRenderer<Template>) -> Router<()> {
    Router::new()
        .route("/", routing::get(index::<Template>))
        .with_state(page)
}

/// Renders the portfolio page around the state of a contact form.
#[derive(Debug)]
pub struct PageRenderer<Template> {
    template: Arc<Template>,
    profile: Arc<Profile>,
}

impl<Template> Clone for PageRenderer<Template> {
    fn clone(&self) -> Self {
        Self {
            template: Arc::clone(&self.template),
            profile: Arc::clone(&self.profile),
        }
    }
}

impl<Template: TemplateService> PageRenderer<Template> {
    pub fn new(template: Arc<Template>, profile: Arc<Profile>) -> Self {
        Self { template, profile }
    }

    pub fn render(&self, status: StatusCode, form: &ContactForm) -> Response {
        let page = PortfolioPageTemplate {
            profile: (*self.profile).clone(),
            year: Utc::now().year(),
            contact: contact_section(form),
        };

        match self.template.render(&page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => internal_server_error(err),
        }
    }
}

async fn index<Template: TemplateService>(page: State<PageRenderer<Template>>) -> Response {
    page.render(StatusCode::OK, &ContactForm::default())
}

#[cfg(test)]
pub(crate) mod tests {
    use folio_models::profile::SocialLinks;
    use folio_templates_contracts::{ContactSectionTemplate, MockTemplateService};

    use super::*;
    use crate::routes::body_text;

    pub fn profile() -> Profile {
        Profile {
            name: "Kevin Setiabudi".into(),
            tagline: "Full Stack Developer".into(),
            logo: "/logo.png".into(),
            picture: "/picture.jpg".into(),
            about: vec![],
            resume_url: None,
            social: SocialLinks::default(),
            projects: vec![],
        }
    }

    pub fn page_template(contact: ContactSectionTemplate) -> PortfolioPageTemplate {
        PortfolioPageTemplate {
            profile: profile(),
            year: Utc::now().year(),
            contact,
        }
    }

    #[tokio::test]
    async fn index_renders_idle_form() {
        // Arrange
        let template = MockTemplateService::new().with_render(
            page_template(ContactSectionTemplate {
                submit_enabled: true,
                ..Default::default()
            }),
            "<html>portfolio</html>".into(),
        );
        let page = PageRenderer::new(Arc::new(template), Arc::new(profile()));

        // Act
        let response = index(State(page)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "<html>portfolio</html>");
    }

    #[tokio::test]
    async fn render_error() {
        // Arrange
        let mut template = MockTemplateService::new();
        template
            .expect_render::<PortfolioPageTemplate>()
            .once()
            .return_once(|_| Err(anyhow::anyhow!("template not found")));
        let page = PageRenderer::new(Arc::new(template), Arc::new(profile()));

        // Act
        let response = index(State(page)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
