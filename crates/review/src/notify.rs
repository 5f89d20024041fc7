use async_trait::async_trait;

use crate::error::NotifyError;
use crate::types::Submission;

/// Trait for submission notifiers.
///
/// Implementations deliver exactly one notification per call to a fixed
/// destination and signal success only after the provider accepts it.
#[async_trait]
pub trait RatingsNotifier: Send + Sync {
    /// Dispatch the formatted submission.
    ///
    /// Must re-validate the payload defensively and fail with
    /// [`NotifyError::InvalidPayload`] before any network I/O when the
    /// reviewer fields or the entry list are empty.
    async fn send_submission(&self, submission: &Submission) -> Result<(), NotifyError>;
}
