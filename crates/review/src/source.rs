use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::AssetRating;

/// Trait for upstream asset rating sources.
///
/// Implementations must handle authentication and mapping from the
/// provider's wire format. A single failed attempt is terminal for the
/// request cycle; implementations never retry.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch the current asset rating list from the provider.
    ///
    /// Must short-circuit with [`SourceError::MissingCredentials`] before
    /// any network I/O when credentials are absent, and must never return
    /// a partial list.
    async fn fetch_assets(&self) -> Result<Vec<AssetRating>, SourceError>;
}
