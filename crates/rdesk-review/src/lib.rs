pub mod api;

use std::sync::Arc;

use tokio::sync::Mutex;

use review::notify::RatingsNotifier;
use review::session::ReviewSession;
use review::source::AssetSource;

/// Metrics for prometheus
pub struct Metrics {
    pub registry: prometheus::Registry,
    pub assets_fetched: prometheus::IntCounter,
    pub fetch_failures: prometheus::IntCounter,
    pub submissions_sent: prometheus::IntCounter,
    pub submission_failures: prometheus::IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = prometheus::Registry::new();

        let assets_fetched = prometheus::IntCounter::new(
            "rdesk_assets_fetched_total",
            "Assets fetched from the rating source",
        )
        .unwrap();
        let fetch_failures = prometheus::IntCounter::new(
            "rdesk_fetch_failures_total",
            "Failed asset fetch attempts",
        )
        .unwrap();
        let submissions_sent = prometheus::IntCounter::new(
            "rdesk_submissions_sent_total",
            "Submissions accepted by the notifier",
        )
        .unwrap();
        let submission_failures = prometheus::IntCounter::new(
            "rdesk_submission_failures_total",
            "Submissions the notifier failed to deliver",
        )
        .unwrap();

        registry.register(Box::new(assets_fetched.clone())).unwrap();
        registry.register(Box::new(fetch_failures.clone())).unwrap();
        registry.register(Box::new(submissions_sent.clone())).unwrap();
        registry
            .register(Box::new(submission_failures.clone()))
            .unwrap();

        Self {
            registry,
            assets_fetched,
            fetch_failures,
            submissions_sent,
            submission_failures,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state
///
/// One in-memory review session; network calls are made outside the
/// session lock.
pub struct AppState {
    pub session: Mutex<ReviewSession>,
    pub source: Arc<dyn AssetSource>,
    pub notifier: Arc<dyn RatingsNotifier>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(source: Arc<dyn AssetSource>, notifier: Arc<dyn RatingsNotifier>) -> Self {
        Self {
            session: Mutex::new(ReviewSession::new()),
            source,
            notifier,
            metrics: Metrics::new(),
        }
    }
}
