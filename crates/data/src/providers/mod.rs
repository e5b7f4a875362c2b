mod in_memory;
mod yahoo;

pub use in_memory::InMemoryProvider;
pub use yahoo::{DEFAULT_BASE_URL, YahooFinanceConfig, YahooFinanceProvider, parse_chart_response};
