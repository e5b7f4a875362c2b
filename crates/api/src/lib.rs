//! REST API server and endpoints.
//!
//! This crate provides the HTTP surface of the quote service:
//! - Latest price lookups, single and batched
//! - RSI and MACD readings over recent history
//! - Intraday chart series
//! - API key authentication
//! - OpenAPI documentation

/// Authentication module.
pub mod auth;
/// Server configuration.
pub mod config;
/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// API request/response models.
pub mod models;
/// OpenAPI documentation.
pub mod openapi;
/// Route definitions.
pub mod routes;
/// Server startup.
pub mod server;
/// Service layer for API operations.
pub mod services;
/// Application state.
pub mod state;

pub use auth::{AuthConfig, AuthError, AuthState};
pub use config::{FetchWindow, ServerConfig};
pub use error::ApiError;
pub use openapi::ApiDoc;
pub use routes::create_router;
pub use server::ApiServer;
pub use services::QuoteService;
pub use state::AppState;
