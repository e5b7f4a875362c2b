use super::{ApiPath, ApiQuery, parse_symbol};
use crate::error::ApiError;
use crate::models::{ErrorResponse, IndicatorQuery, IndicatorsResponse};
use crate::state::AppState;
use axum::{Json, extract::State};
use tracing::info;

/// Latest RSI and MACD readings.
///
/// A reading the history is too short for comes back as `null`.
#[utoipa::path(
    get,
    path = "/stock/{symbol}/indicators",
    tag = "Indicators",
    params(("symbol" = String, Path, description = "Ticker symbol"), IndicatorQuery),
    responses(
        (status = 200, description = "Indicator readings", body = IndicatorsResponse),
        (status = 400, description = "Malformed symbol, window or indicator settings", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "Unknown symbol", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn get_indicators(
    State(state): State<AppState>,
    ApiPath(symbol): ApiPath<String>,
    ApiQuery(query): ApiQuery<IndicatorQuery>,
) -> Result<Json<IndicatorsResponse>, ApiError> {
    let symbol = parse_symbol(&symbol)?;
    let window = state.config.indicator_window.resolve(&query.window())?;
    let params = query.params();

    let result = state.quotes.indicators(&symbol, window, &params).await?;

    info!(symbol = %symbol, rsi = ?result.rsi, "Indicators served");
    Ok(Json(IndicatorsResponse::new(symbol.to_string(), result)))
}
