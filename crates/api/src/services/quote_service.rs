//! Quote service: fetches history and derives prices and indicators.

use crate::config::FetchWindow;
use crate::error::ApiError;
use crate::models::{BatchResponse, IntradayResponse, StockEntry};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use stockq_data::MarketDataProvider;
use stockq_domain::entities::PriceSeries;
use stockq_domain::indicators::{IndicatorParams, compute_indicators};
use stockq_domain::value_objects::{IndicatorResult, Symbol};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Service for quote and indicator lookups.
#[derive(Clone)]
pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
}

impl QuoteService {
    /// Creates a new quote service.
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetches history for `symbol`. An empty series counts as an unknown symbol.
    pub async fn fetch_series(
        &self,
        symbol: &Symbol,
        window: FetchWindow,
    ) -> Result<PriceSeries, ApiError> {
        debug!(
            symbol = %symbol,
            period = %window.period,
            interval = %window.interval,
            provider = self.provider.name(),
            "Fetching price history"
        );

        let series = self
            .provider
            .get_price_history(symbol, window.period, window.interval)
            .await?;

        if series.is_empty() {
            return Err(ApiError::SymbolNotFound(symbol.to_string()));
        }
        Ok(series)
    }

    /// Last close in the window.
    pub async fn latest_price(&self, symbol: &Symbol, window: FetchWindow) -> Result<f64, ApiError> {
        let series = self.fetch_series(symbol, window).await?;
        series
            .last_close()
            .ok_or_else(|| ApiError::SymbolNotFound(symbol.to_string()))
    }

    /// Latest prices for several symbols, fetched concurrently.
    ///
    /// Failures are reported per symbol; only an oversized batch fails the
    /// whole call.
    pub async fn batch_prices(
        &self,
        symbols: &[String],
        window: FetchWindow,
        max_batch: usize,
    ) -> Result<BatchResponse, ApiError> {
        let keys: BTreeSet<String> = symbols.iter().map(|s| s.trim().to_uppercase()).collect();

        if keys.len() > max_batch {
            return Err(ApiError::BadRequest(format!(
                "Too many symbols: {} (max {max_batch})",
                keys.len()
            )));
        }

        let mut results = BatchResponse::new();
        let mut tasks = JoinSet::new();
        let mut task_keys = HashMap::new();

        for key in &keys {
            let symbol = match Symbol::new(key) {
                Ok(symbol) => symbol,
                Err(e) => {
                    results.insert(key.clone(), StockEntry::Error { error: e.to_string() });
                    continue;
                }
            };

            let service = self.clone();
            let handle = tasks.spawn(async move { service.latest_price(&symbol, window).await });
            task_keys.insert(handle.id(), key.clone());
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, outcome),
                Err(e) => {
                    warn!(error = %e, "Batch task aborted");
                    (e.id(), Err(ApiError::Internal(e.to_string())))
                }
            };
            let Some(key) = task_keys.remove(&id) else {
                continue;
            };

            let entry = match outcome {
                Ok(price) => StockEntry::Price { price },
                Err(e) => {
                    debug!(symbol = %key, error = %e, "Batch entry failed");
                    StockEntry::Error { error: e.to_string() }
                }
            };
            results.insert(key, entry);
        }

        info!(count = results.len(), "Batch quote complete");
        Ok(results)
    }

    /// RSI and MACD over the window. Parameters are checked before any fetch.
    pub async fn indicators(
        &self,
        symbol: &Symbol,
        window: FetchWindow,
        params: &IndicatorParams,
    ) -> Result<IndicatorResult, ApiError> {
        params.validate()?;

        let series = self.fetch_series(symbol, window).await?;
        let result = compute_indicators(&series.closes(), params)?;

        debug!(
            symbol = %symbol,
            bars = series.len(),
            rsi = ?result.rsi,
            "Computed indicators"
        );
        Ok(result)
    }

    /// Time labels and closes for charting.
    pub async fn intraday(
        &self,
        symbol: &Symbol,
        window: FetchWindow,
    ) -> Result<IntradayResponse, ApiError> {
        let series = self.fetch_series(symbol, window).await?;
        Ok(IntradayResponse {
            times: series.time_labels(),
            prices: series.closes(),
        })
    }
}
