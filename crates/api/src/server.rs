//! HTTP server startup.

use crate::config::ServerConfig;
use crate::routes::create_router;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use stockq_data::providers::{YahooFinanceConfig, YahooFinanceProvider};
use stockq_data::{MarketDataProvider, ProviderError};
use tokio::net::TcpListener;
use tracing::info;

/// API server bound to one provider.
pub struct ApiServer {
    config: ServerConfig,
    provider: Arc<dyn MarketDataProvider>,
}

impl ApiServer {
    /// Creates a server over an arbitrary provider.
    pub fn new(config: ServerConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { config, provider }
    }

    /// Creates a server backed by Yahoo Finance, using the configured URL and timeout.
    pub fn with_yahoo(config: ServerConfig) -> Result<Self, ProviderError> {
        let provider = YahooFinanceProvider::new(
            YahooFinanceConfig::default()
                .with_base_url(&config.provider_url)
                .with_timeout(config.provider_timeout),
        )?;
        Ok(Self::new(config, Arc::new(provider)))
    }

    /// Builds the router without binding a socket.
    pub fn router(&self) -> Router {
        create_router(AppState::new(self.config.clone(), self.provider.clone()))
    }

    /// Serves until Ctrl+C.
    pub async fn run(self) -> std::io::Result<()> {
        let app = self.router();
        let listener = TcpListener::bind((self.config.bind.as_str(), self.config.port)).await?;

        info!(
            addr = %listener.local_addr()?,
            provider = self.provider.name(),
            auth = !self.config.api_keys.is_empty(),
            "Stock quote API listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires. If the listener cannot be installed, never
/// resolves, so the server keeps running.
async fn wait_for_signal<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_failed_signal_listener_never_shuts_down() {
        let failing = async { Err(std::io::Error::other("no signal support")) };
        let waited = tokio::time::timeout(Duration::from_millis(50), wait_for_signal(failing)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_signal_triggers_shutdown() {
        let fired = async { Ok(()) };
        let waited = tokio::time::timeout(Duration::from_millis(50), wait_for_signal(fired)).await;
        assert!(waited.is_ok());
    }
}
