//! Runtime settings for both report units.
//!
//! Nothing here reads the environment directly; the CLI resolves flags and
//! environment variables and hands the result over.

use std::time::Duration;

use base64::Engine;

use crate::error::{ReqlensError, ReqlensResult};

/// Default requests endpoint.
pub const DEFAULT_REQUESTS_URL: &str =
    "https://weplanet-slack-1g2jdsz4h-yjsungs-projects.vercel.app/api/requests";

/// Default wiki domain.
pub const DEFAULT_CONFLUENCE_DOMAIN: &str = "momgle-edu.atlassian.net";

/// Default display label for the weekly report.
pub const DEFAULT_LABEL: &str = "Momgleedu";

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_TOP_PAGES: usize = 3;
pub const DEFAULT_COMMENT_PAGES: usize = 5;

/// Settings for the request-source analyzer.
#[derive(Debug, Clone)]
pub struct RequestsSettings {
    pub url: String,
    pub timeout: Option<Duration>,
}

impl Default for RequestsSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_REQUESTS_URL.to_string(),
            timeout: None,
        }
    }
}

/// HTTP Basic credential pair.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub api_token: String,
}

impl Credentials {
    pub fn new(email: &str, api_token: &str) -> ReqlensResult<Self> {
        let email = email.trim();
        let api_token = api_token.trim();
        if email.is_empty() {
            return Err(ReqlensError::config("Confluence email is empty"));
        }
        if api_token.is_empty() {
            return Err(ReqlensError::config("Confluence API token is empty"));
        }
        Ok(Self {
            email: email.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Value of the `Authorization` header.
    pub fn basic_auth_header(&self) -> String {
        let pair = format!("{}:{}", self.email, self.api_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair.as_bytes())
        )
    }
}

// Keep the token out of logs and panics.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_token", &"***")
            .finish()
    }
}

/// Settings for the Confluence weekly report.
#[derive(Debug, Clone)]
pub struct ConfluenceSettings {
    /// Scheme and host, no trailing slash (e.g. `https://momgle-edu.atlassian.net`).
    pub base_url: String,
    pub credentials: Credentials,
    pub label: String,
    pub page_limit: u32,
    pub top_pages: usize,
    pub comment_pages: usize,
    pub timeout: Option<Duration>,
}

impl ConfluenceSettings {
    /// Build settings with default limits for the given domain.
    pub fn new(domain: &str, credentials: Credentials) -> ReqlensResult<Self> {
        Ok(Self {
            base_url: base_url_for(domain)?,
            credentials,
            label: DEFAULT_LABEL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            top_pages: DEFAULT_TOP_PAGES,
            comment_pages: DEFAULT_COMMENT_PAGES,
            timeout: None,
        })
    }

    /// REST endpoint listing wiki content.
    pub fn content_url(&self) -> String {
        format!("{}/wiki/rest/api/content", self.base_url)
    }

    /// Browser link for a page's relative `webui` fragment.
    pub fn page_link(&self, webui: &str) -> String {
        format!("{}/wiki{}", self.base_url, webui)
    }
}

/// Turn a bare domain into an `https://` base URL.
///
/// Values that already carry an `http://` or `https://` scheme are kept.
pub fn base_url_for(domain: &str) -> ReqlensResult<String> {
    let domain = domain.trim().trim_end_matches('/');
    if domain.is_empty() {
        return Err(ReqlensError::config("Confluence domain is empty"));
    }

    if domain.starts_with("https://") || domain.starts_with("http://") {
        Ok(domain.to_string())
    } else if domain.contains("://") {
        Err(ReqlensError::config(format!(
            "unsupported scheme in Confluence domain: {}",
            domain
        )))
    } else {
        Ok(format!("https://{}", domain))
    }
}
