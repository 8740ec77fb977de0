use std::{net::SocketAddr, sync::Arc};

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_core_health_impl::HealthFeatureConfig;
use types::{ContactFeature, Email, HealthFeature, RestServer, Template};

pub mod types;

/// Configuration of every service, derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    rest_server_config: RestServerConfig,
    contact_feature_config: ContactFeatureConfig,
    health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            addr: SocketAddr::new(config.http.host, config.http.port),
            profile: config.profile.clone().into(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            email: config.contact.email.clone().into(),
            subject_prefix: config.contact.subject_prefix.as_str().into(),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: *config.health.cache_ttl,
        };

        Self {
            rest_server_config,
            contact_feature_config,
            health_feature_config,
        }
    }
}

/// Wire up the rest server around an smtp client.
pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let ConfigProvider {
        rest_server_config,
        contact_feature_config,
        health_feature_config,
    } = ConfigProvider::new(config);

    let template = Template::new()?;
    let contact = ContactFeature::new(email.clone(), contact_feature_config);
    let health = HealthFeature::new(email, health_feature_config);

    Ok(RestServer::new(health, contact, template, rest_server_config))
}
