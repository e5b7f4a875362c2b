use crate::error::ProviderError;
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use stockq_domain::entities::{PriceBar, PriceSeries};
use stockq_domain::enums::{Interval, Period};
use stockq_domain::value_objects::Symbol;

/// Deterministic provider serving fixed closing prices per symbol.
///
/// Ignores the requested period; the requested interval only spaces the bar
/// timestamps. Every call is counted so callers can assert whether the
/// upstream was reached at all.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    closes: HashMap<String, Vec<f64>>,
    fail_with: Option<ProviderError>,
    calls: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the closing prices of `symbol`, oldest first.
    #[must_use]
    pub fn with_closes(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        self.closes.insert(symbol.trim().to_uppercase(), closes);
        self
    }

    /// Makes every call fail with `error`.
    #[must_use]
    pub fn failing(mut self, error: ProviderError) -> Self {
        self.fail_with = Some(error);
        self
    }

    /// Number of history requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn bar_spacing(interval: Interval) -> Duration {
        match interval {
            Interval::OneMinute => Duration::minutes(1),
            Interval::TwoMinutes => Duration::minutes(2),
            Interval::FiveMinutes => Duration::minutes(5),
            Interval::FifteenMinutes => Duration::minutes(15),
            Interval::ThirtyMinutes => Duration::minutes(30),
            Interval::SixtyMinutes | Interval::OneHour => Duration::hours(1),
            Interval::NinetyMinutes => Duration::minutes(90),
            Interval::OneDay => Duration::days(1),
            Interval::FiveDays => Duration::days(5),
            Interval::OneWeek => Duration::weeks(1),
            Interval::OneMonth => Duration::days(30),
            Interval::ThreeMonths => Duration::days(91),
        }
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn get_price_history(
        &self,
        symbol: &Symbol,
        _period: Period,
        interval: Interval,
    ) -> Result<PriceSeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        let closes = self
            .closes
            .get(symbol.as_str())
            .ok_or_else(|| ProviderError::SymbolNotFound(symbol.to_string()))?;

        // 2024-01-02 14:30 UTC, a New York market open.
        let start = DateTime::<Utc>::from_timestamp(1_704_205_800, 0).unwrap_or_default();
        let spacing = Self::bar_spacing(interval);
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar::flat(start + spacing * i as i32, close))
            .collect();

        Ok(PriceSeries::new(symbol.clone(), interval, 0, bars))
    }
}
