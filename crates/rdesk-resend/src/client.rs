use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use review::error::NotifyError;
use review::notify::RatingsNotifier;
use review::types::Submission;

use crate::config::ResendConfig;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resend API base URL
pub const DEFAULT_API_URL: &str = "https://api.resend.com";

const SEND_PATH: &str = "/emails";
const FROM_ADDRESS: &str = "ratings-form@resend.dev";
const SUBJECT: &str = "New Asset Ratings Submission";

/// Request body for POST /emails
#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

/// Response from a successful send
#[derive(Debug, Deserialize)]
struct EmailResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Resend email notifier
///
/// The API key is optional at construction so a misconfigured service
/// still starts; a send without it fails before any network I/O.
pub struct ResendNotifier {
    http: Client,
    config: Option<ResendConfig>,
    api_url: String,
}

impl ResendNotifier {
    /// Create a notifier with explicit configuration.
    pub fn new(config: ResendConfig, api_url: String) -> Self {
        Self {
            http: build_http(),
            config: Some(config),
            api_url,
        }
    }

    /// Create a notifier from `RESEND_API_KEY` / `RATINGS_NOTIFY_TO`.
    ///
    /// A missing key is tolerated here and surfaced on the first send as
    /// [`NotifyError::MissingCredentials`].
    pub fn from_env(api_url: String) -> Self {
        let config = match ResendConfig::from_env() {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(error = %e, "Resend API key not configured, submissions will fail");
                None
            }
        };
        Self {
            http: build_http(),
            config,
            api_url,
        }
    }
}

fn build_http() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("failed to build HTTP client")
}

/// Defensive second check mirroring the view's submit precondition.
fn validate(submission: &Submission) -> Result<(), NotifyError> {
    if submission.reviewer.name.trim().is_empty() {
        return Err(NotifyError::InvalidPayload("reviewer name is empty".to_string()));
    }
    if submission.reviewer.email.trim().is_empty() {
        return Err(NotifyError::InvalidPayload("reviewer email is empty".to_string()));
    }
    if submission.entries.is_empty() {
        return Err(NotifyError::InvalidPayload("no rating entries".to_string()));
    }
    Ok(())
}

#[async_trait]
impl RatingsNotifier for ResendNotifier {
    async fn send_submission(&self, submission: &Submission) -> Result<(), NotifyError> {
        validate(submission)?;

        let config = self
            .config
            .as_ref()
            .ok_or(NotifyError::MissingCredentials)?;

        let body = EmailRequest {
            from: FROM_ADDRESS,
            to: &config.recipient,
            subject: SUBJECT,
            text: submission.message_text(),
        };

        let url = format!("{}{}", self.api_url, SEND_PATH);
        debug!(url = %url, entries = submission.entries.len(), "sending submission notification");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Timeout {
                        timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
                    }
                } else {
                    NotifyError::Connection(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Send(format!("HTTP {}: {}", status, body)));
        }

        let accepted: EmailResponse = resp
            .json()
            .await
            .unwrap_or(EmailResponse { id: None });
        debug!(id = ?accepted.id, "notification accepted");
        Ok(())
    }
}

impl std::fmt::Debug for ResendNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendNotifier")
            .field("api_url", &self.api_url)
            .field("configured", &self.config.is_some())
            .finish()
    }
}
