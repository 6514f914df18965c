//! Shared error type for the catalog search clients.

use std::sync::Arc;

/// Errors from an upstream catalog search call.
///
/// Normalization is all-or-nothing: any of these aborts the whole page, a
/// partially populated page is never returned.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The client was constructed without its API key.
    #[error("missing API key")]
    MissingApiKey,

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The upstream request timed out.
    #[error("upstream request timed out")]
    Timeout,

    /// Transport-level failure (connect, TLS, read).
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The upstream body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Network(Arc::new(err))
        }
    }
}
