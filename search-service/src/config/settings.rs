//! Environment-sourced settings.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::ServiceError;
use search_service_repository::config::{DEFAULT_HOST, DEFAULT_PORT};
use search_service_repository::{EngineConfig, FallbackPolicy, SearchServiceConfig};

/// Default bind host for the HTTP server.
const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default bind port for the HTTP server.
const DEFAULT_BIND_PORT: u16 = 8000;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ServiceError::config(format!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: EngineConfig,
    pub service: SearchServiceConfig,
    pub bind_host: String,
    pub bind_port: u16,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_HOST`: engine host (default: opensearch)
    /// - `OPENSEARCH_PORT`: engine port (default: 9200)
    /// - `OPENSEARCH_USE_SSL`: connect over https (default: false)
    /// - `OPENSEARCH_VERIFY_CERTS`: verify TLS certificates (default: true)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: basic auth, used only when both are set
    /// - `SEARCH_SERVICE_HOST`: bind host (default: 0.0.0.0)
    /// - `SEARCH_SERVICE_PORT`: bind port (default: 8000)
    /// - `SEARCH_FALLBACK_MODE`: `disabled` or `placeholder` (default: disabled)
    /// - `LOG_FORMAT`: `text` or `json` (default: text)
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let engine = EngineConfig {
            host: lookup("OPENSEARCH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_var(&lookup, "OPENSEARCH_PORT", DEFAULT_PORT)?,
            use_ssl: parse_bool(&lookup, "OPENSEARCH_USE_SSL", false)?,
            verify_certs: parse_bool(&lookup, "OPENSEARCH_VERIFY_CERTS", true)?,
            username: lookup("OPENSEARCH_USERNAME").filter(|v| !v.is_empty()),
            password: lookup("OPENSEARCH_PASSWORD").filter(|v| !v.is_empty()),
        };

        let fallback = match lookup("SEARCH_FALLBACK_MODE") {
            Some(raw) => raw
                .parse::<FallbackPolicy>()
                .map_err(|e| ServiceError::config(format!("SEARCH_FALLBACK_MODE: {}", e)))?,
            None => FallbackPolicy::default(),
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            engine,
            service: SearchServiceConfig { fallback },
            bind_host: lookup("SEARCH_SERVICE_HOST")
                .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            bind_port: parse_var(&lookup, "SEARCH_SERVICE_PORT", DEFAULT_BIND_PORT)?,
            log_format,
        })
    }

    /// The address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServiceError> {
        format!("{}:{}", self.bind_host, self.bind_port)
            .parse()
            .map_err(|e| ServiceError::config(format!("Invalid bind address: {}", e)))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ServiceError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ServiceError::config(format!("{} is invalid: {}", key, e))),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ServiceError::config(format!(
                "{} must be true or false, got '{}'",
                key, other
            ))),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, ServiceError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.engine.host, "opensearch");
        assert_eq!(settings.engine.port, 9200);
        assert!(!settings.engine.use_ssl);
        assert!(settings.engine.verify_certs);
        assert!(settings.engine.credentials().is_none());
        assert_eq!(settings.service.fallback, FallbackPolicy::Disabled);
        assert_eq!(settings.log_format, LogFormat::Text);
        assert_eq!(settings.bind_addr().unwrap().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from(&[
            ("OPENSEARCH_HOST", "search.internal"),
            ("OPENSEARCH_PORT", "9443"),
            ("OPENSEARCH_USE_SSL", "TRUE"),
            ("OPENSEARCH_VERIFY_CERTS", "false"),
            ("OPENSEARCH_USERNAME", "admin"),
            ("OPENSEARCH_PASSWORD", "secret"),
            ("SEARCH_SERVICE_PORT", "9000"),
            ("SEARCH_FALLBACK_MODE", "placeholder"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(settings.engine.url().unwrap().as_str(), "https://search.internal:9443/");
        assert!(!settings.engine.verify_certs);
        assert_eq!(settings.engine.credentials(), Some(("admin", "secret")));
        assert_eq!(settings.service.fallback, FallbackPolicy::Placeholder);
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.bind_port, 9000);
    }

    #[test]
    fn test_invalid_values() {
        assert!(settings_from(&[("OPENSEARCH_PORT", "ninety")]).is_err());
        assert!(settings_from(&[("OPENSEARCH_USE_SSL", "maybe")]).is_err());
        assert!(settings_from(&[("SEARCH_FALLBACK_MODE", "mock")]).is_err());
        assert!(settings_from(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let settings = settings_from(&[("OPENSEARCH_USERNAME", "admin")]).unwrap();
        assert!(settings.engine.credentials().is_none());

        let settings =
            settings_from(&[("OPENSEARCH_USERNAME", "admin"), ("OPENSEARCH_PASSWORD", "")]).unwrap();
        assert!(settings.engine.credentials().is_none());
    }
}
