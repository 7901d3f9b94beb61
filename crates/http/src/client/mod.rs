//! linkqr HTTP client
//!
//! [`LinkQrClient`] sends every authenticated call through the session
//! gateway (see [`gateway`]) and exposes typed helpers for the backend's QR,
//! link, auth and user endpoints on top of it.

pub mod auth;
pub mod descriptor;
pub mod error;
pub mod gateway;
pub mod links;
pub mod navigator;
pub mod qr;
pub mod users;

pub use descriptor::RequestDescriptor;
pub use error::ClientError;
pub use gateway::GatewayOutcome;
pub use navigator::{LogNavigator, Navigator};

use linkqr_core::ClientConfig;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_API_PREFIX: &str = "/api/v1";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_USER_AGENT: &str = concat!("linkqr-client/", env!("CARGO_PKG_VERSION"));

/// linkqr API client
#[derive(Clone)]
pub struct LinkQrClient {
    client: Client,
    base_url: String,
    api_prefix: String,
    login_path: String,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for LinkQrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkQrClient")
            .field("base_url", &self.base_url)
            .field("api_prefix", &self.api_prefix)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

impl LinkQrClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> LinkQrClientBuilder {
        LinkQrClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the login path used for redirects
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Path of an endpoint under the versioned API prefix
    pub fn api_path(&self, suffix: &str) -> String {
        format!("{}{}", self.api_prefix, suffix)
    }

    /// Resolve a descriptor target against the base URL
    pub(crate) fn url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}{}", self.base_url, target)
        }
    }
}

/// Builder for LinkQrClient
#[derive(Default)]
pub struct LinkQrClientBuilder {
    base_url: Option<String>,
    api_prefix: Option<String>,
    login_path: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    navigator: Option<Arc<dyn Navigator>>,
    #[cfg(not(target_arch = "wasm32"))]
    cookie_jar: Option<Arc<reqwest::cookie::Jar>>,
}

impl LinkQrClientBuilder {
    /// Start from loaded client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut builder = Self::default()
            .base_url(&config.base_url)
            .api_prefix(&config.api_prefix)
            .login_path(&config.login_path)
            .user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder.timeout = Some(timeout);
        }
        builder
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API prefix (default `/api/v1`)
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    /// Set the login path (default `/login`)
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the navigator invoked when the session cannot be refreshed
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    /// Share a cookie jar with the client, e.g. to persist the session
    #[cfg(not(target_arch = "wasm32"))]
    pub fn cookie_jar(mut self, jar: Arc<reqwest::cookie::Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<LinkQrClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let api_prefix = self
            .api_prefix
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string())
            .trim_end_matches('/')
            .to_string();
        let login_path = self
            .login_path
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());

        let mut client_builder = ClientBuilder::new()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = self.timeout {
                client_builder = client_builder.timeout(timeout);
            }
            client_builder = match self.cookie_jar {
                Some(jar) => client_builder.cookie_provider(jar),
                None => client_builder.cookie_store(true),
            };
        }

        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout; // Timeouts not supported on WASM; the browser keeps cookies

        let client = client_builder.build()?;

        Ok(LinkQrClient {
            client,
            base_url,
            api_prefix,
            login_path,
            navigator: self.navigator.unwrap_or_else(|| Arc::new(LogNavigator)),
        })
    }
}
