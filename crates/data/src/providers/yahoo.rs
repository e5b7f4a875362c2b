//! Yahoo Finance chart API client.

use crate::error::ProviderError;
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use stockq_domain::entities::{PriceBar, PriceSeries};
use stockq_domain::enums::{Interval, Period};
use stockq_domain::value_objects::Symbol;
use tracing::{debug, warn};

/// Default public endpoint of the chart API.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Connection settings for [`YahooFinanceProvider`].
#[derive(Debug, Clone)]
pub struct YahooFinanceConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// User agent sent upstream; the API rejects empty agents.
    pub user_agent: String,
}

impl Default for YahooFinanceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("stockq/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl YahooFinanceConfig {
    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Price history provider backed by the Yahoo Finance v8 chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooFinanceProvider {
    config: Arc<YahooFinanceConfig>,
    http: Client,
}

impl YahooFinanceProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: YahooFinanceConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    fn chart_url(&self, symbol: &Symbol) -> String {
        format!("{}/v8/finance/chart/{}", self.config.base_url, symbol)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn get_price_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries, ProviderError> {
        let url = self.chart_url(symbol);
        debug!(%symbol, %period, %interval, "Fetching chart");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("range", period.as_str()),
                ("interval", interval.as_str()),
                ("includePrePost", "false"),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_chart_response(symbol, interval, status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Turns a chart API response into a [`PriceSeries`].
///
/// Bars with a null close are dropped. A "Not Found" chart error, or a 404
/// status, becomes `ProviderError::SymbolNotFound`.
///
/// # Errors
/// Returns an error if the upstream reported a failure or the body is not a
/// chart document.
pub fn parse_chart_response(
    symbol: &Symbol,
    interval: Interval,
    status: u16,
    body: &str,
) -> Result<PriceSeries, ProviderError> {
    let success = (200..300).contains(&status);

    let envelope: ChartEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if success => return Err(ProviderError::Decode(e.to_string())),
        Err(_) => {
            return Err(ProviderError::Upstream {
                status,
                message: body.chars().take(200).collect(),
            });
        }
    };

    if let Some(err) = envelope.chart.error {
        if status == 404 || err.code.eq_ignore_ascii_case("Not Found") {
            return Err(ProviderError::SymbolNotFound(symbol.to_string()));
        }
        warn!(%symbol, code = %err.code, "Chart API error");
        return Err(ProviderError::Upstream {
            status,
            message: format!("{}: {}", err.code, err.description),
        });
    }
    if status == 404 {
        return Err(ProviderError::SymbolNotFound(symbol.to_string()));
    }
    if !success {
        return Err(ProviderError::Upstream {
            status,
            message: "unexpected status".to_string(),
        });
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(ProviderError::SymbolNotFound(symbol.to_string()));
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let bars: Vec<PriceBar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = field(&quote.close, i).filter(|c| c.is_finite())?;
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            Some(PriceBar {
                timestamp,
                open: field(&quote.open, i).unwrap_or(close),
                high: field(&quote.high, i).unwrap_or(close),
                low: field(&quote.low, i).unwrap_or(close),
                close,
                volume: field(&quote.volume, i).map(|v| v as u64),
            })
        })
        .collect();

    debug!(%symbol, bars = bars.len(), "Parsed chart response");

    Ok(PriceSeries::new(
        symbol.clone(),
        interval,
        result.meta.gmtoffset.unwrap_or(0),
        bars,
    ))
}
