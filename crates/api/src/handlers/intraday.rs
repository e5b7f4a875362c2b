use super::{ApiPath, ApiQuery, parse_symbol};
use crate::error::ApiError;
use crate::models::{ErrorResponse, IntradayResponse, WindowQuery};
use crate::state::AppState;
use axum::{Json, extract::State};
use tracing::info;

/// Chart series in exchange-local time.
#[utoipa::path(
    get,
    path = "/intraday/{symbol}",
    tag = "Charts",
    params(("symbol" = String, Path, description = "Ticker symbol"), WindowQuery),
    responses(
        (status = 200, description = "Labels and closes", body = IntradayResponse),
        (status = 404, description = "Unknown symbol", body = ErrorResponse)
    )
)]
pub async fn get_intraday(
    State(state): State<AppState>,
    ApiPath(symbol): ApiPath<String>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<Json<IntradayResponse>, ApiError> {
    let symbol = parse_symbol(&symbol)?;
    let window = state.config.intraday_window.resolve(&query)?;

    let chart = state.quotes.intraday(&symbol, window).await?;

    info!(symbol = %symbol, points = chart.prices.len(), "Chart served");
    Ok(Json(chart))
}
