use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use folio_models::{email_address::EmailAddressWithName, profile::Profile};
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of config files.
/// Later files override values of earlier ones.
pub const CONFIG_PATHS_ENV: &str = "FOLIO_CONFIG_PATHS";

pub fn load() -> anyhow::Result<Config> {
    match std::env::var(CONFIG_PATHS_ENV) {
        Ok(paths) => load_paths(&paths.split(':').collect::<Vec<_>>()),
        Err(_) => load_paths(&[DEFAULT_CONFIG_PATH]),
    }
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
    pub api: ApiConfig,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Inbox that receives the contact form messages
    pub email: EmailAddressWithName,
    pub subject_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

/// Settings for the `contact send` client command.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub url: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        assert!(!config.profile.projects.is_empty());
        assert!(config.profile.projects[0].demo_url.is_none());
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let dir = std::env::temp_dir().join(format!("folio-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let override_path = dir.join("override.toml");
        std::fs::write(&override_path, "[http]\nport = 9999\n").unwrap();

        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH), override_path.as_path()]).unwrap();

        assert_eq!(config.http.port, 9999);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file() {
        let err = load_paths(&[Path::new("/nonexistent/folio.toml")]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/folio.toml"));
    }
}
