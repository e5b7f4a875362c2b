//! Technical indicators over closing-price series.
//!
//! Every function here is pure: the same closes always produce the same
//! reading, and nothing is cached between calls.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::{Ema, ema_series};
pub use macd::{MacdParams, macd};
pub use rsi::{DEFAULT_RSI_PERIOD, rsi};

use crate::error::DomainError;
use crate::value_objects::indicator_result::IndicatorResult;
use serde::{Deserialize, Serialize};

/// Window settings for [`compute_indicators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd: MacdParams,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            macd: MacdParams::default(),
        }
    }
}

impl IndicatorParams {
    /// Checks every window without touching any data.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.rsi_period == 0 {
            return Err(DomainError::InvalidWindow(
                "RSI period must be greater than zero".to_string(),
            ));
        }
        self.macd.validate()
    }
}

/// Computes RSI and MACD over the same closing-price snapshot.
pub fn compute_indicators(
    closes: &[f64],
    params: &IndicatorParams,
) -> Result<IndicatorResult, DomainError> {
    Ok(IndicatorResult {
        rsi: rsi(closes, params.rsi_period)?,
        macd: macd(closes, params.macd)?,
    })
}

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
