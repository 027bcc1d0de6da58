//! Error types for page fetching and redirect resolution.
//!
//! Extraction itself never fails: missing or malformed metadata degrades to
//! empty fields. Everything that can go wrong lives on the fetch side and is
//! modeled here.

use thiserror::Error;

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Error types for fetch and redirect-resolution operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// Redirect budget exhausted while the server kept redirecting
    #[error("redirect limit of {limit} exceeded")]
    TooManyRedirects { limit: usize },

    /// The request URL or a redirect target failed to parse
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A configured header name or value cannot be encoded on the wire
    #[error("invalid request header '{name}'")]
    InvalidHeader { name: String },

    /// HTTP client construction failed
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure: DNS, connection, TLS, or body read
    #[error("request for '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A redirect status arrived with neither a Location header nor an
    /// in-body link to follow
    #[error("redirect response from '{url}' has no target")]
    MissingRedirectTarget { url: String },
}

impl FetchError {
    /// Check whether this failure is redirect-budget exhaustion.
    ///
    /// Exhaustion signals a redirect loop or hostile configuration and is the
    /// one fetch failure extraction propagates instead of degrading.
    #[must_use]
    pub fn is_redirect_exhaustion(&self) -> bool {
        matches!(self, FetchError::TooManyRedirects { .. })
    }
}
