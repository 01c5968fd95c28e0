//! Fetch error types.

use idlescape_core::DataError;
use thiserror::Error;

/// Errors that can occur while fetching or indexing a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("Document request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Request timed out.
    #[error("Document request timed out after {0}ms")]
    Timeout(u64),

    /// Source is unreachable.
    #[error("Document source unavailable: {0}")]
    Unavailable(String),

    /// Body was not valid JSON.
    #[error("Failed to parse document as JSON: {0}")]
    Parse(String),

    /// Local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document was fetched but rejected while indexing (strict mode).
    #[error("Document rejected: {0}")]
    Index(#[from] DataError),
}

/// The request's timeout is not known here, so a timeout reports `0ms`;
/// [`HttpSource`](crate::HttpSource) substitutes its configured limit.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(0)
        } else if err.is_connect() {
            FetchError::Unavailable(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
