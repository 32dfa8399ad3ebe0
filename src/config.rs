//! Environment configuration
//!
//! `PORT` and `CIVIC_BIND` for the server, `CIVIC_API_URL` for `civic-watch`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
    #[error("Invalid CIVIC_BIND value {value:?}: {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// Fails when `PORT` or `CIVIC_BIND` is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort {
                    value: value.clone(),
                    source,
                })?;
        }

        if let Some(value) = lookup("CIVIC_BIND") {
            config.bind = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBind {
                    value: value.clone(),
                    source,
                })?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// `civic-watch` configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("CIVIC_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn test_port_and_bind_from_env() {
        let config = Config::from_lookup(lookup(&[("PORT", "8080"), ("CIVIC_BIND", "127.0.0.1")]))
            .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "eighty"));

        let err = Config::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn test_client_url_trims_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup(&[("CIVIC_API_URL", "http://civic:9000/")]));
        assert_eq!(config.api_url, "http://civic:9000");

        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
