use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use review::types::{Reviewer, Submission, SubmissionEntry};

use crate::AppState;

/// Build the axum router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/assets", get(fetch_assets))
        .route("/api/assets/:id/rating", put(set_rating))
        .route("/api/assets/:id", delete(remove_asset))
        .route("/api/submit", post(submit))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// GET /api/assets
///
/// One fetch from the upstream source per call. On success the session
/// is (re)loaded and the sorted list returned; on failure the session
/// goes to ready-empty and the error is surfaced.
async fn fetch_assets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.source.fetch_assets().await {
        Ok(items) => {
            state.metrics.assets_fetched.inc_by(items.len() as u64);
            let mut session = state.session.lock().await;
            session.load_assets(items);
            (StatusCode::OK, Json(serde_json::json!(session.assets()))).into_response()
        }
        Err(e) => {
            state.metrics.fetch_failures.inc();
            tracing::error!(error = %e, "asset fetch failed");
            let mut session = state.session.lock().await;
            session.load_failed();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// PUT /api/assets/:id/rating
#[derive(Debug, Deserialize)]
pub struct SetRatingRequest {
    pub rating: String,
}

async fn set_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetRatingRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    if session.set_override(&id, &req.rating) {
        (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "asset not found"})),
        )
            .into_response()
    }
}

/// DELETE /api/assets/:id
///
/// Removes the asset and any override for it in one operation; the
/// asset cannot be re-added within the session.
async fn remove_asset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    if session.remove_asset(&id) {
        (StatusCode::OK, Json(serde_json::json!({"status": "removed"}))).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "asset not found"})),
        )
            .into_response()
    }
}

/// POST /api/submit
///
/// `ratings` supplied: used verbatim. Omitted: derived from the session
/// (override where present, else consensus, in sorted order).
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub ratings: Option<Vec<SubmissionEntry>>,
}

async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    // Validate and mark the submit in flight while holding the session.
    let submission = {
        let mut session = state.session.lock().await;

        let submission = match &req.ratings {
            Some(entries) => {
                if req.name.trim().is_empty()
                    || req.email.trim().is_empty()
                    || entries.is_empty()
                {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({"error": "Missing required fields"})),
                    )
                        .into_response();
                }
                Submission {
                    reviewer: Reviewer {
                        name: req.name.trim().to_string(),
                        email: req.email.trim().to_string(),
                    },
                    entries: entries.clone(),
                }
            }
            None => match session.build_submission(&req.name, &req.email) {
                Ok(submission) => submission,
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({"error": e.to_string()})),
                    )
                        .into_response();
                }
            },
        };

        if let Err(e) = session.begin_submit(submission.reviewer.clone()) {
            return (
                StatusCode::CONFLICT,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response();
        }

        submission
    };

    // Dispatch outside the lock; the Pending phase blocks overlapping
    // submits. The send and the phase settlement run in a spawned task so
    // the phase settles even when the client disconnects and this handler
    // future is dropped mid-flight.
    let task_state = state.clone();
    let task_submission = submission.clone();
    let send_task = tokio::spawn(async move {
        let result = task_state.notifier.send_submission(&task_submission).await;
        let mut session = task_state.session.lock().await;
        match &result {
            Ok(()) => {
                session.finish_submit(true);
                task_state.metrics.submissions_sent.inc();
            }
            Err(_) => {
                session.finish_submit(false);
                task_state.metrics.submission_failures.inc();
            }
        }
        result
    });

    match send_task.await {
        Ok(Ok(())) => {
            tracing::info!(entries = submission.entries.len(), "submission delivered");
            (StatusCode::OK, Json(serde_json::json!({"success": true}))).into_response()
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "submission delivery failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
        Err(e) => {
            // Task panicked before settling; the session may still be
            // Pending, so reset it rather than wedge every later submit.
            tracing::error!(error = %e, "submission task failed");
            let mut session = state.session.lock().await;
            session.finish_submit(false);
            state.metrics.submission_failures.inc();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "internal error"})),
            )
                .into_response()
        }
    }
}

/// GET /health
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "healthy"})))
}

/// GET /metrics
async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let encoder = prometheus::TextEncoder::new();
    let families = state.metrics.registry.gather();
    match encoder.encode_to_string(&families) {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encoding error: {}", e),
        )
            .into_response(),
    }
}
