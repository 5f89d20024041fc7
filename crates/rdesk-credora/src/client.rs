use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use review::error::SourceError;
use review::source::AssetSource;
use review::types::AssetRating;

use crate::config::CredoraConfig;
use crate::types::{GraphQlRequest, GraphQlResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production Credora GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://platform.credora.io/api/v2/graphql";

/// The one fixed query: up to 100 asset ratings with both metric groups.
const ASSET_RATINGS_QUERY: &str = "\
query {
  getAssetRatings(limit: 100) {
    totalCount
    items {
      id
      address
      symbol
      chainId
      consensusMetrics {
        consensusRating
        consensusPd
        consensusScore
      }
      credoraMetrics {
        rating
        pd
        score
        status
        publishDate
        validUntil
        underReview
        methodology
        report
        lgd {
          min
          max
        }
      }
    }
  }
}";

/// Credora GraphQL client
///
/// Credentials are optional at construction so a misconfigured service
/// still starts; a fetch without them fails before any network I/O.
pub struct CredoraClient {
    http: Client,
    credentials: Option<CredoraConfig>,
    api_url: String,
}

impl CredoraClient {
    /// Create a client with explicit credentials.
    pub fn new(credentials: CredoraConfig, api_url: String) -> Self {
        Self {
            http: build_http(),
            credentials: Some(credentials),
            api_url,
        }
    }

    /// Create a client from `CREDORA_CLIENT_ID` / `CREDORA_CLIENT_SECRET`.
    ///
    /// Missing credentials are tolerated here and surfaced on the first
    /// fetch as [`SourceError::MissingCredentials`].
    pub fn from_env(api_url: String) -> Self {
        let credentials = match CredoraConfig::from_env() {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(error = %e, "Credora credentials not configured, asset fetches will fail");
                None
            }
        };
        Self {
            http: build_http(),
            credentials,
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

#[async_trait]
impl AssetSource for CredoraClient {
    async fn fetch_assets(&self) -> Result<Vec<AssetRating>, SourceError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SourceError::MissingCredentials)?;

        debug!(url = %self.api_url, "fetching asset ratings");

        let resp = self
            .http
            .post(&self.api_url)
            .header("clientId", &credentials.client_id)
            .header("clientSecret", &credentials.client_secret)
            .json(&GraphQlRequest {
                query: ASSET_RATINGS_QUERY,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout {
                        timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
                    }
                } else {
                    SourceError::Connection(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Unexpected(e.to_string()))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope
                .errors
                .iter()
                .map(|e| e.message.clone().unwrap_or_else(|| "unknown error".to_string()))
                .collect();
            return Err(SourceError::Unexpected(messages.join("; ")));
        }

        let page = envelope
            .data
            .and_then(|d| d.get_asset_ratings)
            .ok_or_else(|| {
                SourceError::Unexpected("response missing getAssetRatings".to_string())
            })?;

        debug!(count = page.items.len(), "fetched asset ratings");
        Ok(page.items)
    }
}

impl std::fmt::Debug for CredoraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredoraClient")
            .field("api_url", &self.api_url)
            .field("configured", &self.credentials.is_some())
            .finish()
    }
}
