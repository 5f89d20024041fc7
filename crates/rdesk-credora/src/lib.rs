//! Credora GraphQL source adapter.
//!
//! Issues the one fixed `getAssetRatings` query and maps the response
//! into the core [`review::types::AssetRating`] shape. No retry,
//! pagination, or caching.

pub mod client;
pub mod config;
pub mod types;

pub use client::{CredoraClient, DEFAULT_API_URL};
pub use config::CredoraConfig;
