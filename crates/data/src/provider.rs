use crate::error::ProviderError;
use async_trait::async_trait;
use stockq_domain::entities::PriceSeries;
use stockq_domain::enums::{Interval, Period};
use stockq_domain::value_objects::Symbol;

/// A source of historical price bars keyed by ticker symbol.
///
/// Implementations do one fetch per call: no retries and no caching.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetches the bars of `symbol` over `period`, sampled every `interval`.
    ///
    /// An unknown symbol yields either `ProviderError::SymbolNotFound` or an
    /// empty series, depending on what the upstream reports.
    async fn get_price_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries, ProviderError>;
}
