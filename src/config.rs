use std::env;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("STORE_CREDENTIALS environment variable is missing")]
    MissingCredentials,

    #[error("Invalid base64 in STORE_CREDENTIALS: {0}")]
    CredentialsEncoding(#[from] base64::DecodeError),

    #[error("Invalid JSON in STORE_CREDENTIALS: {0}")]
    CredentialsFormat(#[from] serde_json::Error),
}

/// Store credentials, delivered as a base64-encoded JSON blob the way the
/// deployment platform injects secrets.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreCredentials {
    pub database_path: String,
}

impl StoreCredentials {
    pub fn from_base64(blob: &str) -> Result<Self, ConfigError> {
        let bytes = BASE64.decode(blob.trim())?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub credentials: StoreCredentials,
}

impl Config {
    /// Load configuration from the environment. Credential problems are fatal:
    /// the caller is expected to abort before binding a listener.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let blob = env::var("STORE_CREDENTIALS").map_err(|_| ConfigError::MissingCredentials)?;
        let credentials = StoreCredentials::from_base64(&blob)?;

        Ok(Self {
            host,
            port,
            credentials,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
