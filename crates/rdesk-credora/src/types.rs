use serde::{Deserialize, Serialize};

use review::types::AssetRating;

/// GraphQL request body: the one fixed query, no variables
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<GraphQlData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A GraphQL-level error entry
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlData {
    #[serde(default)]
    pub get_asset_ratings: Option<AssetRatingsPage>,
}

/// Payload of `getAssetRatings`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRatingsPage {
    #[serde(default)]
    pub total_count: Option<i64>,
    #[serde(default)]
    pub items: Vec<AssetRating>,
}
