use crate::entities::price_bar::PriceBar;
use crate::enums::Interval;
use crate::value_objects::symbol::Symbol;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Time-ascending bars for one symbol, period and interval.
///
/// Gaps are left as-is; a bar the provider did not return is simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub interval: Interval,
    /// Exchange offset from UTC in seconds, used for display labels.
    pub utc_offset_secs: i32,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, interval: Interval, utc_offset_secs: i32, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol,
            interval,
            utc_offset_secs,
            bars,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Current price: the close of the most recent bar.
    #[must_use]
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Chart labels in exchange-local time, one per bar.
    #[must_use]
    pub fn time_labels(&self) -> Vec<String> {
        let offset = FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix());
        let format = self.interval.label_format();
        self.bars
            .iter()
            .map(|b| b.timestamp.with_timezone(&offset).format(format).to_string())
            .collect()
    }
}
