//! Client configuration

use thiserror::Error;

/// Environment variable holding the API base URL
pub const ENV_API_URL: &str = "ADMIN_API_URL";
/// Environment variable holding the bearer token
pub const ENV_API_TOKEN: &str = "ADMIN_API_TOKEN";
/// Environment variable holding the request timeout in seconds
pub const ENV_API_TIMEOUT: &str = "ADMIN_API_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Client configuration for connecting to the administration API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Bearer token issued by the session service
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("admin-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(ENV_API_URL))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: ENV_API_URL,
                value: base_url,
            });
        }

        let mut config = Self::new(base_url);

        if let Some(token) = lookup(ENV_API_TOKEN).filter(|t| !t.trim().is_empty()) {
            config = config.with_token(token.trim());
        }

        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            let timeout = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or(ConfigError::Invalid {
                    name: ENV_API_TIMEOUT,
                    value: raw.clone(),
                })?;
            config = config.with_timeout(timeout);
        }

        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/api")
    }
}
