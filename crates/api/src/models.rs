//! Request and response bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stockq_domain::indicators::{IndicatorParams, MacdParams};
use stockq_domain::value_objects::{IndicatorResult, MacdValue};
use utoipa::{IntoParams, ToSchema};

/// Service banner returned at `/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    pub version: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Latest price of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceResponse {
    pub symbol: String,
    pub price: f64,
}

/// One entry of a batch quote: either a price or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StockEntry {
    Price { price: f64 },
    Error { error: String },
}

/// Batch quote keyed by uppercased symbol.
pub type BatchResponse = BTreeMap<String, StockEntry>;

/// MACD reading in the indicators response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MacdResponse {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl From<MacdValue> for MacdResponse {
    fn from(v: MacdValue) -> Self {
        Self {
            macd: v.macd,
            signal: v.signal,
            histogram: v.histogram,
        }
    }
}

/// Latest indicator readings; `null` when the history is too short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndicatorsResponse {
    pub symbol: String,
    pub rsi: Option<f64>,
    pub macd: Option<MacdResponse>,
}

impl IndicatorsResponse {
    pub fn new(symbol: impl Into<String>, result: IndicatorResult) -> Self {
        Self {
            symbol: symbol.into(),
            rsi: result.rsi,
            macd: result.macd.map(MacdResponse::from),
        }
    }
}

/// Chart series: one label and one closing price per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IntradayResponse {
    pub times: Vec<String>,
    pub prices: Vec<f64>,
}

/// Optional overrides of the fetch window.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// Lookback range, e.g. `1d`, `3mo`, `1y`.
    pub period: Option<String>,
    /// Bar interval, e.g. `1m`, `5m`, `1d`.
    pub interval: Option<String>,
}

/// Fetch window and indicator settings of `/stock/{symbol}/indicators`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndicatorQuery {
    /// Lookback range, e.g. `3mo`.
    pub period: Option<String>,
    /// Bar interval, e.g. `1d`.
    pub interval: Option<String>,
    /// RSI lookback, default 14.
    pub rsi_period: Option<usize>,
    /// MACD fast EMA span, default 12.
    pub fast: Option<usize>,
    /// MACD slow EMA span, default 26.
    pub slow: Option<usize>,
    /// MACD signal EMA span, default 9.
    pub signal: Option<usize>,
}

impl IndicatorQuery {
    pub fn window(&self) -> WindowQuery {
        WindowQuery {
            period: self.period.clone(),
            interval: self.interval.clone(),
        }
    }

    pub fn params(&self) -> IndicatorParams {
        let defaults = IndicatorParams::default();
        IndicatorParams {
            rsi_period: self.rsi_period.unwrap_or(defaults.rsi_period),
            macd: MacdParams {
                fast: self.fast.unwrap_or(defaults.macd.fast),
                slow: self.slow.unwrap_or(defaults.macd.slow),
                signal: self.signal.unwrap_or(defaults.macd.signal),
            },
        }
    }
}
