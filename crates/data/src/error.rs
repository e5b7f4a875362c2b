use thiserror::Error;

/// Failures of a market data provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider has no data for the symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
    /// The request did not complete within the configured timeout.
    #[error("Provider request timed out")]
    Timeout,
    /// Connection or transport failure.
    #[error("Provider request failed: {0}")]
    Http(String),
    /// The provider answered with an error status.
    #[error("Provider returned status {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Error description from the provider.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}
