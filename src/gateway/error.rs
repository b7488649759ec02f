//! Gateway error types

use thiserror::Error;

/// Errors surfaced by the remote state gateway.
///
/// Neither variant is retried: a failed fetch or apply aborts the whole
/// pass and propagates to the process boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
