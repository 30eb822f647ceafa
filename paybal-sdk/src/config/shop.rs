//! Admin API access configuration.

use url::Url;

/// Admin API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// Everything needed to reach one store's Admin API.
#[derive(Clone)]
pub struct AdminApiConfig {
    /// Store origin, e.g. `https://example.myshopify.com/`.
    pub base_url: Url,
    /// Static Admin API access token.
    pub access_token: String,
    /// Dated API version segment, e.g. `2024-10`.
    pub api_version: String,
}

impl AdminApiConfig {
    /// Build the config for a `*.myshopify.com` domain.
    pub fn for_shop(
        domain: &str,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let domain = domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        Ok(Self {
            base_url: Url::parse(&format!("https://{domain}/"))?,
            access_token: access_token.into(),
            api_version: api_version.into(),
        })
    }

    /// Point the client somewhere other than the store domain.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Resolve `/admin/api/{version}/{resource}` against the base URL.
    pub fn endpoint(&self, resource: &str) -> Result<Url, url::ParseError> {
        self.base_url
            .join(&format!("/admin/api/{}/{}", self.api_version, resource))
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for AdminApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}
