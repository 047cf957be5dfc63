use thiserror::Error;

/// Errors from [`crate::search::PlaceSearchProvider::search`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The request timed out.
    #[error("search request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with an HTTP error status.
    #[error("search request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request could not be delivered.
    #[error("search request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The service reported an error in its response body.
    #[error("search service reported an error: {message}")]
    Service {
        /// Message supplied by the service.
        message: String,
    },
    /// The response could not be decoded.
    #[error("failed to parse search response: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
}
