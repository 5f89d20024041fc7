use serde::{Deserialize, Serialize};

/// One asset with its rating metrics as returned by the upstream provider.
///
/// Immutable once fetched for the session; field names are camelCase on
/// the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRating {
    pub id: String,
    #[serde(default)]
    pub address: Option<String>,
    pub symbol: String,
    #[serde(default)]
    pub chain_id: Option<String>,
    pub consensus_metrics: ConsensusMetrics,
    pub credora_metrics: CredoraMetrics,
}

/// Aggregate/benchmark metrics; the consensus rating is the default
/// selection and the sort key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusMetrics {
    pub consensus_rating: String,
    #[serde(default)]
    pub consensus_pd: Option<f64>,
    #[serde(default)]
    pub consensus_score: Option<f64>,
}

/// The provider's own proprietary metrics, shown read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredoraMetrics {
    pub rating: String,
    #[serde(default)]
    pub pd: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub under_review: Option<bool>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub lgd: Option<Lgd>,
}

/// Loss-given-default range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lgd {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// The person submitting the review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub name: String,
    pub email: String,
}

/// One line of a submission: the rating the reviewer settled on for an
/// asset, alongside the provider ratings it was reconciled against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEntry {
    pub id: String,
    pub symbol: String,
    pub selected_rating: String,
    pub consensus_rating: String,
    pub credora_rating: String,
}

/// A completed submission: reviewer plus entries in view order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub reviewer: Reviewer,
    pub entries: Vec<SubmissionEntry>,
}

impl Submission {
    /// Render the plain-text notification body.
    ///
    /// Header line identifies the reviewer, then one line per entry:
    /// `SYMBOL: selected (Consensus: consensus, Credora: credora)`.
    pub fn message_text(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                format!(
                    "{}: {} (Consensus: {}, Credora: {})",
                    e.symbol, e.selected_rating, e.consensus_rating, e.credora_rating
                )
            })
            .collect();

        format!(
            "Reviewer: {} ({})\n\nRatings:\n{}",
            self.reviewer.name,
            self.reviewer.email,
            lines.join("\n")
        )
    }
}
