use folio_models::profile::Profile;
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

pub trait Template: Serialize {
    /// Names ending in `.html` are rendered with html escaping.
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    PortfolioPageTemplate("portfolio.html"),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioPageTemplate {
    pub profile: Profile,
    pub year: i32,
    pub contact: ContactSectionTemplate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactSectionTemplate {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    /// Reason of a failed submission
    pub error: Option<String>,
    pub name_error: Option<String>,
    pub email_error: Option<String>,
    pub message_error: Option<String>,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}
