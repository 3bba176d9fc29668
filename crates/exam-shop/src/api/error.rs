//! Errors raised while talking to the storefront backend.

use thiserror::Error;

/// Failure of a single REST call.
///
/// Payloads are plain strings so the error stays `Clone` and can travel through the
/// order-book actor and back to the caller unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    /// Connection refused, timeout, TLS failure and the like.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode backend response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
