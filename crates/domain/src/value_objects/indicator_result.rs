use serde::{Deserialize, Serialize};

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Indicators derived from one price series snapshot.
///
/// `None` means the series was too short for the indicator to produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub rsi: Option<f64>,
    pub macd: Option<MacdValue>,
}
