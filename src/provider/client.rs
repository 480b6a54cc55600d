//! Mono REST API Client
//!
//! HTTP client for communicating with Mono's REST API. Holds the secret key;
//! nothing outside this module ever sees it.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::models::{AccountResponse, AssetsResponse, AuthRequest, AuthResponse};
use super::{AccountDetails, AccountId, Asset, Earning, Provider};
use crate::config::ProviderSettings;

/// Header carrying the secret key on every Mono request
pub const SECRET_KEY_HEADER: &str = "mono-sec-key";

/// Mono REST API client
pub struct MonoClient {
    client: Client,
    config: MonoConfig,
}

/// Configuration for the Mono client
#[derive(Clone)]
pub struct MonoConfig {
    /// Base URL for the Mono API (e.g., "https://api.withmono.com")
    pub base_url: String,
    /// Secret key sent in the `mono-sec-key` header
    pub secret_key: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for MonoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.withmono.com".to_string(),
            secret_key: String::new(),
            request_timeout_ms: 30_000,
        }
    }
}

impl fmt::Debug for MonoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonoConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &"<redacted>")
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl From<&ProviderSettings> for MonoConfig {
    fn from(settings: &ProviderSettings) -> Self {
        Self {
            base_url: settings.api_endpoint.clone(),
            secret_key: settings.secret_key.clone(),
            request_timeout_ms: settings.request_timeout_secs * 1000,
        }
    }
}

impl MonoClient {
    /// Create a new Mono client with the given configuration
    pub fn new(config: MonoConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("investy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &MonoConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn account_path(id: &AccountId, suffix: &str) -> String {
        let encoded = urlencoding::encode(id.as_str());
        if suffix.is_empty() {
            format!("accounts/{}", encoded)
        } else {
            format!("accounts/{}/{}", encoded, suffix)
        }
    }

    /// Start an authenticated request
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header(SECRET_KEY_HEADER, &self.config.secret_key)
    }

    /// Send a request and decode the fully buffered JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request.send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

fn classify(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_connect() {
        ProviderError::Unavailable
    } else {
        ProviderError::Request(e)
    }
}

#[async_trait]
impl Provider for MonoClient {
    async fn exchange_code(&self, code: &str) -> Result<AccountId, ProviderError> {
        let request = self
            .request(Method::POST, "account/auth")
            .json(&AuthRequest { code });

        let response: AuthResponse = self.send_json(request).await?;
        if response.id.is_empty() {
            return Err(ProviderError::Parse("auth response carried an empty id".into()));
        }

        tracing::debug!(account_id = %response.id, "Exchanged Connect code");
        Ok(AccountId::new(response.id))
    }

    async fn account_info(&self, id: &AccountId) -> Result<AccountDetails, ProviderError> {
        let request = self.request(Method::GET, &Self::account_path(id, ""));
        let response: AccountResponse = self.send_json(request).await?;
        Ok(response.account)
    }

    async fn assets(&self, id: &AccountId) -> Result<Vec<Asset>, ProviderError> {
        let request = self.request(Method::GET, &Self::account_path(id, "assets"));
        let response: AssetsResponse = self.send_json(request).await?;
        Ok(response.assets)
    }

    async fn earnings(&self, id: &AccountId) -> Result<Vec<Earning>, ProviderError> {
        let request = self.request(Method::GET, &Self::account_path(id, "earnings"));
        self.send_json(request).await
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when communicating with Mono
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Mono API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type RequestLog = Arc<Mutex<Vec<(String, String)>>>;

    fn record(log: &RequestLog, path: String, headers: &HeaderMap) {
        let key = headers
            .get(SECRET_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        log.lock().unwrap().push((path, key));
    }

    /// Spawn a local stand-in for the Mono API and return its base URL
    async fn spawn_stub() -> (String, RequestLog) {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

        let auth_log = Arc::clone(&log);
        let account_log = Arc::clone(&log);
        let assets_log = Arc::clone(&log);
        let earnings_log = Arc::clone(&log);

        let app = Router::new()
            .route(
                "/account/auth",
                post(move |headers: HeaderMap, Json(body): Json<Value>| async move {
                    record(&auth_log, "account/auth".into(), &headers);
                    match body["code"].as_str() {
                        Some("code_ok") => (StatusCode::OK, Json(json!({"id": "acc_1"}))),
                        _ => (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"message": "invalid code"})),
                        ),
                    }
                }),
            )
            .route(
                "/accounts/:id",
                get(move |headers: HeaderMap, Path(id): Path<String>| async move {
                    record(&account_log, format!("accounts/{}", id), &headers);
                    Json(json!({"account": {"name": "Ada Obi", "institution": {"name": "Trove"}}}))
                }),
            )
            .route(
                "/accounts/:id/assets",
                get(move |headers: HeaderMap, Path(id): Path<String>| async move {
                    record(&assets_log, format!("accounts/{}/assets", id), &headers);
                    Json(json!({"assets": [
                        {"name": "AAPL", "type": "stock", "cost": 10000, "quantity": 2, "currency": "USD"},
                        {"name": "MSFT", "type": "stock", "cost": 5000, "quantity": 1, "currency": "USD"}
                    ]}))
                }),
            )
            .route(
                "/accounts/:id/earnings",
                get(move |headers: HeaderMap, Path(id): Path<String>| async move {
                    record(&earnings_log, format!("accounts/{}/earnings", id), &headers);
                    "this is not json"
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), log)
    }

    fn client_for(base_url: String) -> MonoClient {
        MonoClient::new(MonoConfig {
            base_url,
            secret_key: "test_sk".to_string(),
            request_timeout_ms: 5_000,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = MonoConfig::default();
        assert_eq!(config.base_url, "https://api.withmono.com");
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_account_path_is_encoded() {
        let id = AccountId::new("acc 1/x");
        assert_eq!(MonoClient::account_path(&id, "assets"), "accounts/acc%201%2Fx/assets");
        assert_eq!(MonoClient::account_path(&AccountId::new("acc_1"), ""), "accounts/acc_1");
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = client_for("http://example.test/".to_string());
        assert_eq!(client.url("account/auth"), "http://example.test/account/auth");
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = client_for("http://example.test".to_string());
        assert!(!format!("{:?}", client.config()).contains("test_sk"));
    }

    #[tokio::test]
    async fn test_exchange_then_fetch_uses_returned_id() {
        let (base_url, log) = spawn_stub().await;
        let client = client_for(base_url);

        let id = client.exchange_code("code_ok").await.unwrap();
        assert_eq!(id, AccountId::new("acc_1"));

        let assets = client.assets(&id).await.unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].name, "AAPL");

        let info = client.account_info(&id).await.unwrap();
        assert_eq!(info.institution.name, "Trove");

        let log = log.lock().unwrap();
        let paths: Vec<&str> = log.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["account/auth", "accounts/acc_1/assets", "accounts/acc_1"]);
        assert!(log.iter().all(|(_, key)| key == "test_sk"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let (base_url, _log) = spawn_stub().await;
        let client = client_for(base_url);

        let err = client.exchange_code("bad").await.unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("invalid code"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (base_url, _log) = spawn_stub().await;
        let client = client_for(base_url);

        let err = client.earnings(&AccountId::new("acc_1")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.assets(&AccountId::new("acc_1")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable));
    }
}
