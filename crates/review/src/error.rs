use thiserror::Error;

/// Errors from loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from the upstream asset source
#[derive(Error, Debug)]
pub enum SourceError {
    /// Credentials absent; the call was never attempted.
    #[error("missing Credora API credentials")]
    MissingCredentials,

    #[error("source connection error: {0}")]
    Connection(String),

    #[error("source timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("source returned unexpected response: {0}")]
    Unexpected(String),
}

/// Errors from the review session's submit preconditions
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Local validation failed; no network call was made.
    #[error("{0}")]
    Validation(String),

    /// A prior submit has not settled yet.
    #[error("a submission is already in flight")]
    AlreadyPending,
}

/// Errors from the submission notifier
#[derive(Error, Debug)]
pub enum NotifyError {
    /// API key absent; the call was never attempted.
    #[error("missing notification API key")]
    MissingCredentials,

    /// Name, email, or entries missing/empty; no network call was made.
    #[error("invalid submission payload: {0}")]
    InvalidPayload(String),

    #[error("notifier connection error: {0}")]
    Connection(String),

    #[error("notifier timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("notification send failed: {0}")]
    Send(String),
}
