use thiserror::Error;

/// Errors raised while validating domain inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Symbol is empty, too long or contains characters no exchange uses.
    #[error("Invalid symbol format: {0:?}")]
    InvalidSymbol(String),
    /// Unknown lookback period.
    #[error("Invalid period: {0:?}")]
    InvalidPeriod(String),
    /// Unknown bar interval.
    #[error("Invalid interval: {0:?}")]
    InvalidInterval(String),
    /// Indicator window parameters are out of range.
    #[error("Invalid indicator window: {0}")]
    InvalidWindow(String),
}
