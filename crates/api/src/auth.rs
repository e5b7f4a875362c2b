//! API key authentication.
//!
//! Keys come from configuration; several may be valid at once so a key can be
//! rotated without downtime. With no keys configured the gate is open.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Valid API keys.
    pub api_keys: HashSet<String>,
    /// Whether authentication is required.
    pub require_auth: bool,
}

impl AuthConfig {
    /// Builds a config from a list of keys; blank entries are ignored.
    ///
    /// Authentication is required as soon as one key is present.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let api_keys: HashSet<String> = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        let require_auth = !api_keys.is_empty();

        Self {
            api_keys,
            require_auth,
        }
    }
}

/// Authentication state shared across handlers.
#[derive(Debug, Clone)]
pub struct AuthState {
    config: Arc<AuthConfig>,
}

impl AuthState {
    /// Creates a new authentication state.
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Validates an API key.
    #[must_use]
    pub fn validate_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    /// Checks if authentication is required.
    #[must_use]
    pub fn require_auth(&self) -> bool {
        self.config.require_auth
    }

    /// Decides whether a request with these headers may proceed.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        if !self.require_auth() {
            return Ok(());
        }

        match extract_api_key(headers) {
            Some(key) if self.validate_api_key(key) => Ok(()),
            Some(_) => Err(AuthError::InvalidApiKey),
            None => Err(AuthError::MissingApiKey),
        }
    }
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No API key header on the request.
    #[error("Missing API key")]
    MissingApiKey,
    /// Unknown API key.
    #[error("Invalid API key")]
    InvalidApiKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Extracts the API key from request headers.
pub fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}

/// Authentication middleware.
///
/// Runs before the handler, so a rejected request never reaches the market
/// data provider.
pub async fn require_api_key(
    State(auth): State<AuthState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    match auth.authorize(request.headers()) {
        Ok(()) => {
            debug!(path = %request.uri().path(), "API key accepted");
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!(path = %request.uri().path(), error = %e, "Rejected request");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    fn headers_with_key(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn test_from_keys_ignores_blanks() {
        let config = AuthConfig::from_keys(["alpha", " ", "", " beta "]);
        assert_eq!(config.api_keys.len(), 2);
        assert!(config.api_keys.contains("beta"));
        assert!(config.require_auth);

        let open = AuthConfig::from_keys(Vec::<String>::new());
        assert!(!open.require_auth);
    }

    #[test]
    fn test_authorize_accepts_any_configured_key() {
        let auth = AuthState::new(AuthConfig::from_keys(["old-key", "new-key"]));
        assert_eq!(auth.authorize(&headers_with_key("old-key")), Ok(()));
        assert_eq!(auth.authorize(&headers_with_key("new-key")), Ok(()));
    }

    #[test]
    fn test_authorize_rejects_wrong_or_missing_key() {
        let auth = AuthState::new(AuthConfig::from_keys(["secret"]));
        assert_eq!(
            auth.authorize(&headers_with_key("Secret")),
            Err(AuthError::InvalidApiKey)
        );
        assert_eq!(
            auth.authorize(&HeaderMap::new()),
            Err(AuthError::MissingApiKey)
        );
    }

    #[test]
    fn test_authorize_open_when_no_keys() {
        let auth = AuthState::new(AuthConfig::default());
        assert!(!auth.require_auth());
        assert_eq!(auth.authorize(&HeaderMap::new()), Ok(()));
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        let name = HeaderName::from_bytes(b"X-API-Key").unwrap();
        headers.insert(name, HeaderValue::from_static("k"));
        assert_eq!(extract_api_key(&headers), Some("k"));
    }
}
