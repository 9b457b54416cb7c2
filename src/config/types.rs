//! Configuration data model.
//!
//! `ClientConfig` is what the client is constructed from; `FileConfig` is the
//! on-disk TOML shape the CLI loader resolves into it.

use serde::Deserialize;
use std::time::Duration;

use super::defaults::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::build_info::USER_AGENT;
use crate::types::DEFAULT_ENGINE;

/// Client construction settings. Captured by `ApiClient::new` and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request.
    pub api_key: String,
    /// API root; request paths are appended verbatim.
    pub base_url: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Engine used by operations that do not name one.
    pub default_engine: String,
    /// Sent as `OpenAI-Organization` when present.
    pub organization: Option<String>,
    /// Whole-request timeout applied to the built-in transport.
    pub timeout: Duration,
    /// Custom transport. When set, `timeout` is not applied; configure it on
    /// the supplied client instead.
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Settings with every default applied around the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            default_engine: DEFAULT_ENGINE.to_string(),
            organization: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http_client: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_default_engine(mut self, engine: impl Into<String>) -> Self {
        self.default_engine = engine.into();
        self
    }

    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http_client = Some(http);
        self
    }
}

/// On-disk `gpt3.toml` shape. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct FileConfig {
    pub api_key: Option<String>,
    /// Name of an environment variable holding the API key.
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub engine: Option<String>,
    pub organization: Option<String>,
    pub timeout_secs: Option<u64>,
}
