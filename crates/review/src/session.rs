use std::collections::HashMap;

use crate::error::SubmitError;
use crate::scale::{self, RatingSignal};
use crate::types::{AssetRating, Reviewer, Submission, SubmissionEntry};

/// Load lifecycle of the asset list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Initial state, fetch not yet settled
    Loading,
    /// Assets populated and sorted
    Ready,
    /// Fetch failed, asset list is empty
    ReadyEmpty,
}

/// Submit request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    /// A submit is in flight; starting another is a checked error
    Pending,
}

/// In-memory review session: the fetched assets, the sparse override map,
/// and the explicit load/submit lifecycles.
///
/// Assets are kept sorted by consensus-rating rank (best first), with
/// unrecognized ratings after all recognized ones in source order. The
/// override map never holds an id that is not in the visible list;
/// removal deletes the asset and its override in one operation.
#[derive(Debug)]
pub struct ReviewSession {
    assets: Vec<AssetRating>,
    overrides: HashMap<String, String>,
    reviewer: Option<Reviewer>,
    load_state: LoadState,
    submit_phase: SubmitPhase,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            assets: Vec::new(),
            overrides: HashMap::new(),
            reviewer: None,
            load_state: LoadState::Loading,
            submit_phase: SubmitPhase::Idle,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn submit_phase(&self) -> SubmitPhase {
        self.submit_phase
    }

    /// Populate the session from a successful fetch.
    ///
    /// Sorts by consensus-rating rank ascending; the sort is stable so
    /// ties and unrecognized ratings keep their source order. Overrides
    /// from a previous load are discarded.
    pub fn load_assets(&mut self, mut items: Vec<AssetRating>) {
        items.sort_by_key(|a| scale::sort_rank(&a.consensus_metrics.consensus_rating));
        self.assets = items;
        self.overrides.clear();
        self.load_state = LoadState::Ready;
    }

    /// Record a failed fetch: empty list, error surfaced by the caller.
    pub fn load_failed(&mut self) {
        self.assets.clear();
        self.overrides.clear();
        self.load_state = LoadState::ReadyEmpty;
    }

    /// Currently visible assets in sorted order.
    pub fn assets(&self) -> &[AssetRating] {
        &self.assets
    }

    pub fn override_for(&self, asset_id: &str) -> Option<&str> {
        self.overrides.get(asset_id).map(String::as_str)
    }

    pub fn reviewer(&self) -> Option<&Reviewer> {
        self.reviewer.as_ref()
    }

    /// Set or overwrite the override for a visible asset.
    ///
    /// Returns false when no asset with that id is visible, keeping the
    /// invariant that the override map only refers to visible assets.
    /// Sort order is unaffected: it always keys off the consensus rating.
    pub fn set_override(&mut self, asset_id: &str, rating: &str) -> bool {
        if !self.assets.iter().any(|a| a.id == asset_id) {
            return false;
        }
        self.overrides
            .insert(asset_id.to_string(), rating.to_string());
        true
    }

    /// Remove an asset from the visible list, deleting any override for
    /// it in the same operation. Returns false when the id is unknown.
    /// Removed assets are excluded from any subsequent submission and
    /// cannot be re-added within the session.
    pub fn remove_asset(&mut self, asset_id: &str) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != asset_id);
        if self.assets.len() == before {
            return false;
        }
        self.overrides.remove(asset_id);
        true
    }

    /// Effective rating for an asset: the override when present, else the
    /// consensus rating.
    pub fn selected_rating<'a>(&'a self, asset: &'a AssetRating) -> &'a str {
        self.override_for(&asset.id)
            .unwrap_or(&asset.consensus_metrics.consensus_rating)
    }

    /// Color signal for an asset: its effective rating compared to the
    /// consensus rating by scale rank.
    pub fn signal(&self, asset: &AssetRating) -> RatingSignal {
        scale::signal(
            self.selected_rating(asset),
            &asset.consensus_metrics.consensus_rating,
        )
    }

    /// Build the submission payload from all currently visible assets in
    /// their sorted order.
    ///
    /// Fails with [`SubmitError::Validation`] when the reviewer fields are
    /// empty or no assets are visible; callers must not issue any network
    /// call in that case.
    pub fn build_submission(&self, name: &str, email: &str) -> Result<Submission, SubmitError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(SubmitError::Validation(
                "reviewer name and email are required".to_string(),
            ));
        }
        if self.assets.is_empty() {
            return Err(SubmitError::Validation(
                "at least one asset is required".to_string(),
            ));
        }

        let entries = self
            .assets
            .iter()
            .map(|asset| SubmissionEntry {
                id: asset.id.clone(),
                symbol: asset.symbol.clone(),
                selected_rating: self.selected_rating(asset).to_string(),
                consensus_rating: asset.consensus_metrics.consensus_rating.clone(),
                credora_rating: asset.credora_metrics.rating.clone(),
            })
            .collect();

        Ok(Submission {
            reviewer: Reviewer {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
            },
            entries,
        })
    }

    /// Mark a submit as in flight. Rejects overlapping submits.
    pub fn begin_submit(&mut self, reviewer: Reviewer) -> Result<(), SubmitError> {
        if self.submit_phase == SubmitPhase::Pending {
            return Err(SubmitError::AlreadyPending);
        }
        self.reviewer = Some(reviewer);
        self.submit_phase = SubmitPhase::Pending;
        Ok(())
    }

    /// Settle the in-flight submit.
    ///
    /// On success the overrides and the stored reviewer are cleared; on
    /// failure everything is preserved so the user can retry.
    pub fn finish_submit(&mut self, success: bool) {
        if success {
            self.overrides.clear();
            self.reviewer = None;
        }
        self.submit_phase = SubmitPhase::Idle;
    }
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConsensusMetrics, CredoraMetrics};

    fn asset(id: &str, symbol: &str, consensus: &str, credora: &str) -> AssetRating {
        AssetRating {
            id: id.to_string(),
            address: None,
            symbol: symbol.to_string(),
            chain_id: None,
            consensus_metrics: ConsensusMetrics {
                consensus_rating: consensus.to_string(),
                consensus_pd: None,
                consensus_score: None,
            },
            credora_metrics: CredoraMetrics {
                rating: credora.to_string(),
                pd: None,
                score: None,
                status: None,
                publish_date: None,
                valid_until: None,
                under_review: None,
                methodology: None,
                report: None,
                lgd: None,
            },
        }
    }

    fn loaded(items: Vec<AssetRating>) -> ReviewSession {
        let mut session = ReviewSession::new();
        session.load_assets(items);
        session
    }

    // ======================================================================
    // Load lifecycle and sorting
    // ======================================================================

    #[test]
    fn test_new_session_is_loading() {
        let session = ReviewSession::new();
        assert_eq!(session.load_state(), LoadState::Loading);
        assert_eq!(session.submit_phase(), SubmitPhase::Idle);
        assert!(session.assets().is_empty());
    }

    #[test]
    fn test_load_assets_sorts_best_first() {
        // Input arrives worst-first; the loaded list puts the best consensus rating first.
        let session = loaded(vec![
            asset("2", "XYZ", "D", "C"),
            asset("1", "BTC", "AAA", "AA+"),
        ]);
        assert_eq!(session.load_state(), LoadState::Ready);
        let symbols: Vec<&str> = session.assets().iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "XYZ"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_ratings() {
        let session = loaded(vec![
            asset("1", "AAA1", "AAA", "AAA"),
            asset("2", "AAA2", "AAA", "AAA"),
            asset("3", "AAA3", "AAA", "AAA"),
        ]);
        let symbols: Vec<&str> = session.assets().iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA1", "AAA2", "AAA3"]);
    }

    #[test]
    fn test_unrecognized_ratings_sort_last_in_source_order() {
        let session = loaded(vec![
            asset("1", "UNK1", "NR", "NR"),
            asset("2", "WORST", "D", "D"),
            asset("3", "UNK2", "???", "???"),
            asset("4", "BEST", "AAA", "AAA"),
        ]);
        let symbols: Vec<&str> = session.assets().iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BEST", "WORST", "UNK1", "UNK2"]);
    }

    #[test]
    fn test_load_failed_empties_list() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.set_override("1", "A");
        session.load_failed();
        assert_eq!(session.load_state(), LoadState::ReadyEmpty);
        assert!(session.assets().is_empty());
        assert_eq!(session.override_for("1"), None);
    }

    #[test]
    fn test_reload_discards_stale_overrides() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.set_override("1", "A");
        session.load_assets(vec![asset("2", "ETH", "BB", "BB-")]);
        assert_eq!(session.override_for("1"), None);
    }

    // ======================================================================
    // Overrides and removal
    // ======================================================================

    #[test]
    fn test_selected_rating_falls_back_to_consensus() {
        let session = loaded(vec![asset("1", "BTC", "BB", "BB-")]);
        assert_eq!(session.selected_rating(&session.assets()[0]), "BB");
    }

    #[test]
    fn test_override_supersedes_consensus() {
        let mut session = loaded(vec![asset("1", "BTC", "BB", "BB-")]);
        assert!(session.set_override("1", "A"));
        assert_eq!(session.selected_rating(&session.assets()[0]), "A");
    }

    #[test]
    fn test_override_overwrite() {
        let mut session = loaded(vec![asset("1", "BTC", "BB", "BB-")]);
        session.set_override("1", "A");
        session.set_override("1", "CCC");
        assert_eq!(session.override_for("1"), Some("CCC"));
    }

    #[test]
    fn test_override_unknown_asset_rejected() {
        let mut session = loaded(vec![asset("1", "BTC", "BB", "BB-")]);
        assert!(!session.set_override("999", "A"));
        assert_eq!(session.override_for("999"), None);
    }

    #[test]
    fn test_override_does_not_affect_sort_order() {
        let mut session = loaded(vec![
            asset("1", "BTC", "AAA", "AA+"),
            asset("2", "XYZ", "D", "C"),
        ]);
        // Override BTC to worst; sort still keys off consensus
        session.set_override("1", "D");
        let symbols: Vec<&str> = session.assets().iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "XYZ"]);
    }

    #[test]
    fn test_remove_asset_deletes_override_atomically() {
        let mut session = loaded(vec![
            asset("1", "BTC", "AAA", "AA+"),
            asset("2", "XYZ", "D", "C"),
        ]);
        session.set_override("1", "A");
        assert!(session.remove_asset("1"));
        assert_eq!(session.assets().len(), 1);
        assert_eq!(session.override_for("1"), None);
    }

    #[test]
    fn test_remove_unknown_asset() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        assert!(!session.remove_asset("999"));
        assert_eq!(session.assets().len(), 1);
    }

    #[test]
    fn test_removed_asset_excluded_from_submission() {
        let mut session = loaded(vec![
            asset("1", "BTC", "AAA", "AA+"),
            asset("2", "XYZ", "D", "C"),
        ]);
        session.remove_asset("2");
        let submission = session.build_submission("Jane", "j@x.com").unwrap();
        assert_eq!(submission.entries.len(), 1);
        assert_eq!(submission.entries[0].symbol, "BTC");
    }

    // ======================================================================
    // Color signal
    // ======================================================================

    #[test]
    fn test_signal_downgraded_override() {
        // An override worse than consensus reads as a downgrade.
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.set_override("1", "A");
        assert_eq!(session.signal(&session.assets()[0]), RatingSignal::Downgraded);
    }

    #[test]
    fn test_signal_improved_override() {
        let mut session = loaded(vec![asset("1", "XYZ", "CCC", "CC")]);
        session.set_override("1", "BBB");
        assert_eq!(session.signal(&session.assets()[0]), RatingSignal::Improved);
    }

    #[test]
    fn test_signal_neutral_without_override() {
        let session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        assert_eq!(session.signal(&session.assets()[0]), RatingSignal::Neutral);
    }

    #[test]
    fn test_signal_neutral_for_unrecognized_consensus() {
        let mut session = loaded(vec![asset("1", "BTC", "NR", "AA+")]);
        session.set_override("1", "A");
        assert_eq!(session.signal(&session.assets()[0]), RatingSignal::Neutral);
    }

    // ======================================================================
    // Submission payload
    // ======================================================================

    #[test]
    fn test_build_submission_override_else_consensus() {
        let mut session = loaded(vec![
            asset("1", "BTC", "AAA", "AA+"),
            asset("2", "XYZ", "BB", "BB-"),
        ]);
        session.set_override("1", "AA");
        let submission = session.build_submission("Jane", "j@x.com").unwrap();
        assert_eq!(submission.entries[0].selected_rating, "AA");
        assert_eq!(submission.entries[0].consensus_rating, "AAA");
        assert_eq!(submission.entries[1].selected_rating, "BB");
        assert_eq!(submission.entries[1].credora_rating, "BB-");
    }

    #[test]
    fn test_build_submission_preserves_sorted_order() {
        let session = loaded(vec![
            asset("2", "XYZ", "D", "C"),
            asset("1", "BTC", "AAA", "AA+"),
        ]);
        let submission = session.build_submission("Jane", "j@x.com").unwrap();
        let symbols: Vec<&str> = submission.entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "XYZ"]);
    }

    #[test]
    fn test_build_submission_rejects_empty_name() {
        let session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        assert!(matches!(
            session.build_submission("  ", "j@x.com"),
            Err(SubmitError::Validation(_))
        ));
    }

    #[test]
    fn test_build_submission_rejects_empty_email() {
        let session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        assert!(matches!(
            session.build_submission("Jane", ""),
            Err(SubmitError::Validation(_))
        ));
    }

    #[test]
    fn test_build_submission_rejects_empty_asset_list() {
        let mut session = ReviewSession::new();
        session.load_failed();
        assert!(matches!(
            session.build_submission("Jane", "j@x.com"),
            Err(SubmitError::Validation(_))
        ));
    }

    // ======================================================================
    // Submit lifecycle
    // ======================================================================

    fn jane() -> Reviewer {
        Reviewer {
            name: "Jane".into(),
            email: "j@x.com".into(),
        }
    }

    #[test]
    fn test_begin_submit_sets_pending() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.begin_submit(jane()).unwrap();
        assert_eq!(session.submit_phase(), SubmitPhase::Pending);
        assert_eq!(session.reviewer(), Some(&jane()));
    }

    #[test]
    fn test_overlapping_submit_rejected() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.begin_submit(jane()).unwrap();
        assert!(matches!(
            session.begin_submit(jane()),
            Err(SubmitError::AlreadyPending)
        ));
    }

    #[test]
    fn test_finish_submit_success_clears_overrides_and_reviewer() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.set_override("1", "A");
        session.begin_submit(jane()).unwrap();
        session.finish_submit(true);
        assert_eq!(session.submit_phase(), SubmitPhase::Idle);
        assert_eq!(session.override_for("1"), None);
        assert_eq!(session.reviewer(), None);
        // assets remain visible for the next submission
        assert_eq!(session.assets().len(), 1);
    }

    #[test]
    fn test_finish_submit_failure_preserves_state() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.set_override("1", "A");
        session.begin_submit(jane()).unwrap();
        session.finish_submit(false);
        assert_eq!(session.submit_phase(), SubmitPhase::Idle);
        assert_eq!(session.override_for("1"), Some("A"));
        assert_eq!(session.reviewer(), Some(&jane()));
        assert_eq!(session.assets().len(), 1);
    }

    #[test]
    fn test_submit_can_be_retried_after_failure() {
        let mut session = loaded(vec![asset("1", "BTC", "AAA", "AA+")]);
        session.begin_submit(jane()).unwrap();
        session.finish_submit(false);
        assert!(session.begin_submit(jane()).is_ok());
    }
}
