use serde::{Deserialize, Serialize};
use url::Url;

/// Static content of the portfolio page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub logo: String,
    pub picture: String,
    pub about: Vec<String>,
    pub resume_url: Option<String>,
    pub social: SocialLinks,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: Option<Url>,
    pub linkedin: Option<Url>,
    pub twitter: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Projects without a public demo are shown as proprietary.
    pub demo_url: Option<Url>,
    pub repo_url: Option<Url>,
}
