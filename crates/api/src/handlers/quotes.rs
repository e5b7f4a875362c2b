use super::{ApiJson, ApiPath, ApiQuery, parse_symbol};
use crate::error::ApiError;
use crate::models::{BatchResponse, ErrorResponse, PriceResponse, StockEntry, WindowQuery};
use crate::state::AppState;
use axum::{Json, extract::State};
use tracing::info;

/// Latest price, open to anyone.
#[utoipa::path(
    get,
    path = "/price/{symbol}",
    tag = "Quotes",
    params(("symbol" = String, Path, description = "Ticker symbol"), WindowQuery),
    responses(
        (status = 200, description = "Latest price", body = PriceResponse),
        (status = 400, description = "Malformed symbol or window", body = ErrorResponse),
        (status = 404, description = "Unknown symbol", body = ErrorResponse),
        (status = 502, description = "Provider unavailable", body = ErrorResponse)
    )
)]
pub async fn get_price(
    State(state): State<AppState>,
    ApiPath(symbol): ApiPath<String>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<Json<PriceResponse>, ApiError> {
    price_response(&state, &symbol, &query).await.map(Json)
}

/// Latest price behind the API key gate.
#[utoipa::path(
    get,
    path = "/stock/{symbol}",
    tag = "Quotes",
    params(("symbol" = String, Path, description = "Ticker symbol"), WindowQuery),
    responses(
        (status = 200, description = "Latest price", body = PriceResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "Unknown symbol", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn get_stock(
    State(state): State<AppState>,
    ApiPath(symbol): ApiPath<String>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<Json<PriceResponse>, ApiError> {
    price_response(&state, &symbol, &query).await.map(Json)
}

/// Latest prices for a list of symbols; failures are reported per symbol.
#[utoipa::path(
    post,
    path = "/stocks",
    tag = "Quotes",
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Price or error per symbol", body = std::collections::BTreeMap<String, StockEntry>),
        (status = 400, description = "Too many symbols", body = ErrorResponse),
        (status = 422, description = "Body is not an array of strings", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn post_stocks(
    State(state): State<AppState>,
    ApiJson(symbols): ApiJson<Vec<String>>,
) -> Result<Json<BatchResponse>, ApiError> {
    info!(count = symbols.len(), "Batch quote requested");

    let window = state.config.quote_window;
    let batch = state
        .quotes
        .batch_prices(&symbols, window, state.config.max_batch)
        .await?;
    Ok(Json(batch))
}

async fn price_response(
    state: &AppState,
    raw: &str,
    query: &WindowQuery,
) -> Result<PriceResponse, ApiError> {
    let symbol = parse_symbol(raw)?;
    let window = state.config.quote_window.resolve(query)?;
    let price = state.quotes.latest_price(&symbol, window).await?;

    info!(symbol = %symbol, price, "Quote served");
    Ok(PriceResponse {
        symbol: symbol.to_string(),
        price,
    })
}
