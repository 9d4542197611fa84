//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

use super::constants::{
    DEFAULT_BACKEND_TIMEOUT_SECS, DEFAULT_COUCHDB_ADMIN_USER, DEFAULT_COUCHDB_URL,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_STATIC_DIR,
};

/// Configuration loading failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub couchdb_url: String,
    pub admin_user: String,
    admin_password: String,
    pub backend_timeout: Duration,
    pub server_host: String,
    pub server_port: u16,
    pub static_dir: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("couchdb_url", &self.couchdb_url)
            .field("admin_user", &self.admin_user)
            .field("admin_password", &"[REDACTED]")
            .field("backend_timeout", &self.backend_timeout)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let admin_password = env::var("COUCHDB_ADMIN_PASSWORD")
            .map_err(|_| ConfigError::Missing("COUCHDB_ADMIN_PASSWORD"))?;

        let couchdb_url =
            env::var("COUCHDB_URL").unwrap_or_else(|_| DEFAULT_COUCHDB_URL.to_string());

        let mut config = Self::new(couchdb_url, admin_password);
        config.admin_user = env::var("COUCHDB_ADMIN_USER")
            .unwrap_or_else(|_| DEFAULT_COUCHDB_ADMIN_USER.to_string());
        config.server_host =
            env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string());
        config.server_port = parse_var("PORT")?.unwrap_or(DEFAULT_SERVER_PORT);
        config.static_dir =
            env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());
        config.backend_timeout = Duration::from_secs(
            parse_var("BACKEND_TIMEOUT_SECS")?.unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
        );

        Ok(config)
    }

    /// Build a configuration with defaults for everything except the backend.
    pub fn new(couchdb_url: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            couchdb_url: couchdb_url.into().trim_end_matches('/').to_string(),
            admin_user: DEFAULT_COUCHDB_ADMIN_USER.to_string(),
            admin_password: admin_password.into(),
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }

    /// Administrator password used for user creation.
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}
