// Process configuration, read once at startup and passed explicitly to whoever needs it.
//
// Keys
// - NODE_ENV    run mode, only logged.
// - CORS_ALLOW  comma separated list of allowed origins. `*` or an empty list allows any origin.
// - HOST, PORT  bind address of the HTTP listener.
// - BODY_LIMIT  maximum number of request body bytes buffered by the body parser.

use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_NODE_ENV: &str = "development";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid BODY_LIMIT: {0}")]
    InvalidBodyLimit(String),

    #[error("invalid bind address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub node_env: String,
    pub cors_allow: Vec<String>,
    pub host: String,
    pub port: u16,
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_env: DEFAULT_NODE_ENV.to_string(),
            cors_allow: Vec::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        let body_limit = match lookup("BODY_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBodyLimit(raw.clone()))?,
            None => defaults.body_limit,
        };

        Ok(Self {
            node_env: lookup("NODE_ENV")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.node_env),
            cors_allow: lookup("CORS_ALLOW")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_allow),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            body_limit,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
