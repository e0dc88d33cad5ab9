//! Fetch errors.

use thiserror::Error;

/// Why a storefront request produced no usable response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never completed: offline, CORS, connection reset.
    #[error("network error: {0}")]
    Network(String),

    /// The browser refused to build a request for this URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not the expected text or JSON.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// No transport exists on this target (e.g. no `window`).
    #[error("no transport available: {0}")]
    Unsupported(&'static str),
}

impl FetchError {
    /// HTTP status for [`FetchError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
