use crate::auth::AuthState;
use crate::config::ServerConfig;
use crate::services::QuoteService;
use std::sync::Arc;
use stockq_data::MarketDataProvider;

/// Shared application state, passed to all handlers via `axum::extract::State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub quotes: QuoteService,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(config: ServerConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        let auth = AuthState::new(config.auth_config());
        Self {
            config: Arc::new(config),
            quotes: QuoteService::new(provider),
            auth,
        }
    }
}
