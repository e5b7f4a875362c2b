//! OpenAPI documentation configuration.

use crate::handlers;
use crate::models::{
    ErrorResponse, HealthResponse, IndicatorsResponse, IntradayResponse, MacdResponse,
    MessageResponse, PriceResponse, StockEntry,
};
use utoipa::OpenApi;

/// OpenAPI documentation structure.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Quote & Indicator API",
        description = "Latest stock prices, RSI and MACD readings, and intraday \
                       chart series backed by a public market data provider.",
        license(name = "MIT OR Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Banner and liveness"),
        (name = "Quotes", description = "Latest prices"),
        (name = "Indicators", description = "RSI and MACD"),
        (name = "Charts", description = "Intraday series")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::get_price,
        handlers::get_stock,
        handlers::post_stocks,
        handlers::get_indicators,
        handlers::get_intraday,
    ),
    components(
        schemas(
            MessageResponse,
            HealthResponse,
            ErrorResponse,
            PriceResponse,
            StockEntry,
            IndicatorsResponse,
            MacdResponse,
            IntradayResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security addon for OpenAPI.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(crate::auth::API_KEY_HEADER),
                    ),
                ),
            );
        }
    }
}

/// Returns the OpenAPI JSON specification.
#[must_use]
pub fn openapi_json() -> String {
    ApiDoc::openapi().to_pretty_json().unwrap_or_default()
}
