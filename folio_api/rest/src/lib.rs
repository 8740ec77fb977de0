use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use folio_models::profile::Profile;
use folio_templates_contracts::TemplateService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact, Template> {
    health: Health,
    contact: Contact,
    template: Template,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub profile: Arc<Profile>,
}

impl<Health, Contact, Template> RestServer<Health, Contact, Template>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
    Template: TemplateService,
{
    pub fn new(
        health: Health,
        contact: Contact,
        template: Template,
        config: RestServerConfig,
    ) -> Self {
        Self {
            health,
            contact,
            template,
            config,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();
        let listener = TcpListener::bind(addr).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let page = routes::page::PageRenderer::new(self.template.into(), self.config.profile);

        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::page::router(page.clone()))
            .merge(routes::contact::router(self.contact.into(), page));

        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
