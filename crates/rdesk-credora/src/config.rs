//! Credora credentials
//!
//! Loaded from environment variables once at startup.

use std::env;

use review::error::ConfigError;

/// Credora API credentials, passed as request headers.
#[derive(Debug, Clone)]
pub struct CredoraConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl CredoraConfig {
    /// Load credentials from environment variables
    ///
    /// Required:
    /// - `CREDORA_CLIENT_ID`
    /// - `CREDORA_CLIENT_SECRET`
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = env::var("CREDORA_CLIENT_ID")
            .map_err(|_| ConfigError::MissingEnvVar("CREDORA_CLIENT_ID".to_string()))?;

        let client_secret = env::var("CREDORA_CLIENT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("CREDORA_CLIENT_SECRET".to_string()))?;

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Create credentials with explicit values (for testing)
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }
}
