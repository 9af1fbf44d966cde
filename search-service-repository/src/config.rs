//! Configuration types for the engine connection and the search service.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::errors::SearchError;

/// Default engine host.
pub const DEFAULT_HOST: &str = "opensearch";

/// Default engine port.
pub const DEFAULT_PORT: u16 = 9200;

/// Connection settings for the search engine.
#[derive(Clone)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
    /// Connect over `https`.
    pub use_ssl: bool,
    /// Verify the engine's certificate when `use_ssl` is set.
    pub verify_certs: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            use_ssl: false,
            verify_certs: true,
            username: None,
            password: None,
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("use_ssl", &self.use_ssl)
            .field("verify_certs", &self.verify_certs)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl EngineConfig {
    /// Create a config for a plain-http engine at `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Enable TLS, optionally skipping certificate verification.
    pub fn with_tls(mut self, verify_certs: bool) -> Self {
        self.use_ssl = true;
        self.verify_certs = verify_certs;
        self
    }

    /// Set basic-auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// The engine base URL.
    pub fn url(&self) -> Result<Url, SearchError> {
        let scheme = if self.use_ssl { "https" } else { "http" };
        Url::parse(&format!("{}://{}:{}", scheme, self.host, self.port))
            .map_err(|e| SearchError::connection(format!("Invalid engine address: {}", e)))
    }

    /// Basic-auth credentials, only when both username and password are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

/// What the read path returns when the engine fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Propagate the error to the caller.
    #[default]
    Disabled,
    /// Return placeholder results marked as degraded.
    Placeholder,
}

impl FromStr for FallbackPolicy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Ok(Self::Disabled),
            "placeholder" => Ok(Self::Placeholder),
            other => Err(SearchError::invalid_request(format!(
                "Unknown fallback mode '{}', expected 'disabled' or 'placeholder'",
                other
            ))),
        }
    }
}

/// Configuration for the SearchService.
#[derive(Debug, Clone, Default)]
pub struct SearchServiceConfig {
    pub fallback: FallbackPolicy,
}

impl SearchServiceConfig {
    /// Create a config that substitutes placeholder results on engine failure.
    pub fn with_placeholder_fallback() -> Self {
        Self {
            fallback: FallbackPolicy::Placeholder,
        }
    }
}
