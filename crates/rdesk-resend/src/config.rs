//! Resend configuration
//!
//! Loads the API key and optional recipient override from environment
//! variables.

use std::env;

use review::error::ConfigError;

/// Default destination for submission notifications.
pub const DEFAULT_RECIPIENT: &str = "darshan@credora.io";

/// Resend notifier configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub recipient: String,
}

impl ResendConfig {
    /// Load configuration from environment variables
    ///
    /// Required:
    /// - `RESEND_API_KEY`
    ///
    /// Optional:
    /// - `RATINGS_NOTIFY_TO`: recipient override (default fixed address)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("RESEND_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("RESEND_API_KEY".to_string()))?;

        let recipient =
            env::var("RATINGS_NOTIFY_TO").unwrap_or_else(|_| DEFAULT_RECIPIENT.to_string());

        Ok(Self { api_key, recipient })
    }

    /// Create configuration with explicit values (for testing)
    pub fn new(api_key: String, recipient: String) -> Self {
        Self { api_key, recipient }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = ResendConfig::new("key".to_string(), "ops@example.com".to_string());
        assert_eq!(config.api_key, "key");
        assert_eq!(config.recipient, "ops@example.com");
    }
}
