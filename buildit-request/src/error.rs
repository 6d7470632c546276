//! Request builder error types.

use thiserror::Error;

/// Result type for request builder operations.
pub type Result<T> = std::result::Result<T, RequestError>;

/// Request builder errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The accumulated state cannot be resolved into an absolute URL.
    ///
    /// This is the only error `RequestBuilder::build` returns.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// An HTTP method token outside GET, POST, PUT and DELETE.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A header rejected while converting into an `http::Request`.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// Header name as supplied.
        name: String,
        /// Reason reported by the `http` crate.
        message: String,
    },

    /// Conversion into an `http::Request` failed.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl RequestError {
    /// Check if this error came from `build()`.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRequest(_))
    }
}

impl From<http::Error> for RequestError {
    fn from(err: http::Error) -> Self {
        Self::Http(err.to_string())
    }
}
