use crate::auth::AuthConfig;
use crate::models::WindowQuery;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use stockq_domain::DomainError;
use stockq_domain::enums::{Interval, Period};
use tracing::warn;

/// Lookback period and bar interval of one provider request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub period: Period,
    pub interval: Interval,
}

impl FetchWindow {
    pub const fn new(period: Period, interval: Interval) -> Self {
        Self { period, interval }
    }

    /// Applies per-request overrides on top of this default.
    pub fn resolve(&self, query: &WindowQuery) -> Result<Self, DomainError> {
        let period = match query.period.as_deref() {
            Some(p) => p.parse()?,
            None => self.period,
        };
        let interval = match query.interval.as_deref() {
            Some(i) => i.parse()?,
            None => self.interval,
        };
        Ok(Self { period, interval })
    }
}

/// Server configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Accepted `x-api-key` values. Empty ⇒ auth disabled.
    pub api_keys: Vec<String>,

    // ── Provider ───────────────────────────────────────────────────
    pub provider_url: String,
    pub provider_timeout: Duration,

    // ── Request shaping ────────────────────────────────────────────
    pub max_batch: usize,
    pub quote_window: FetchWindow,
    pub indicator_window: FetchWindow,
    pub intraday_window: FetchWindow,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
            api_keys: Vec::new(),
            provider_url: stockq_data::providers::DEFAULT_BASE_URL.to_string(),
            provider_timeout: Duration::from_secs(10),
            max_batch: 25,
            quote_window: FetchWindow::new(Period::OneDay, Interval::OneMinute),
            indicator_window: FetchWindow::new(Period::ThreeMonths, Interval::OneDay),
            intraday_window: FetchWindow::new(Period::OneDay, Interval::OneMinute),
        }
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Ignoring unparsable setting");
            default
        }),
        _ => default,
    }
}

fn env_list(name: &str) -> Vec<String> {
    env::var(name)
        .map(|s| {
            s.split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn env_window(prefix: &str, default: FetchWindow) -> FetchWindow {
    FetchWindow {
        period: env_parse(&format!("{prefix}_PERIOD"), default.period),
        interval: env_parse(&format!("{prefix}_INTERVAL"), default.interval),
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind: env_str("STOCKQ_BIND", &defaults.bind),
            port: env_parse("STOCKQ_PORT", defaults.port),
            api_keys: env_list("STOCKQ_API_KEYS"),
            provider_url: env_str("STOCKQ_PROVIDER_URL", &defaults.provider_url),
            provider_timeout: Duration::from_secs(env_parse(
                "STOCKQ_PROVIDER_TIMEOUT_SECS",
                defaults.provider_timeout.as_secs(),
            )),
            max_batch: env_parse("STOCKQ_MAX_BATCH", defaults.max_batch),
            quote_window: env_window("STOCKQ_QUOTE", defaults.quote_window),
            indicator_window: env_window("STOCKQ_INDICATOR", defaults.indicator_window),
            intraday_window: env_window("STOCKQ_INTRADAY", defaults.intraday_window),
        }
    }

    /// Authentication settings for the configured keys.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::from_keys(&self.api_keys)
    }
}
