use crate::auth::require_api_key;
use crate::handlers;
use crate::openapi::openapi_json;
use crate::state::AppState;
use axum::{
    Router,
    http::header,
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router.
///
/// Gated routes run the API key check before their handler, so a rejected
/// request never reaches the provider.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/stock/{symbol}", get(handlers::get_stock))
        .route("/stock/{symbol}/indicators", get(handlers::get_indicators))
        .route("/stocks", post(handlers::post_stocks))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_api_key,
        ));

    let public = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/price/{symbol}", get(handlers::get_price))
        .route("/intraday/{symbol}", get(handlers::get_intraday))
        .route(
            "/api-docs/openapi.json",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], openapi_json()) }),
        );

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
