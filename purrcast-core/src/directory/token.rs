//! Client-credentials token cache for the adoption directory.

use std::fmt::Debug;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{AuthError, truncate_body};

/// A bearer token and the instant it stops being valid.
///
/// Replaced wholesale on each refresh, never mutated in place.
#[derive(Debug, Clone)]
struct Credential {
    token: String,
    expires_at: DateTime<Utc>,
}

impl Credential {
    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && now < self.expires_at
    }
}

/// Source of bearer tokens for directory requests.
///
/// Production wires in [`TokenCache`]; tests can inject a fixed token.
#[async_trait]
pub trait TokenSource: Send + Sync + Debug {
    async fn token(&self) -> Result<String, AuthError>;
}

/// Caches one client-credentials token and refreshes it on demand.
///
/// `token()` returns the cached token without any network call while it is
/// still valid, and performs a single exchange otherwise. The refresh is
/// serialized: concurrent callers over an expired credential wait on the
/// in-flight exchange and share its result. A failed exchange leaves the
/// previous entry in place, so the next call simply retries.
#[derive(Debug)]
pub struct TokenCache {
    http: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    current: Mutex<Option<Credential>>,
}

impl TokenCache {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(crate::REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for the directory token endpoint")?;

        Ok(Self {
            http,
            base_url: super::DIRECTORY_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            current: Mutex::new(None),
        })
    }

    /// Point the cache at a different token endpoint host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn exchange(&self) -> Result<Credential, AuthError> {
        let url = format!("{}/oauth2/token", self.base_url);

        let res = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(AuthError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)?;

        Ok(Credential {
            token: parsed.access_token,
            expires_at: Utc::now() + Duration::seconds(parsed.expires_in),
        })
    }
}

#[async_trait]
impl TokenSource for TokenCache {
    async fn token(&self) -> Result<String, AuthError> {
        // The lock is held across the exchange: callers arriving during a
        // refresh wait here and then see the fresh credential.
        let mut current = self.current.lock().await;

        if let Some(cred) = current.as_ref() {
            if cred.is_valid(Utc::now()) {
                return Ok(cred.token.clone());
            }
        }

        tracing::debug!("directory token missing or expired, exchanging credentials");
        let fresh = self.exchange().await?;
        let token = fresh.token.clone();
        *current = Some(fresh);

        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token_body(token: &str, expires_in: i64) -> serde_json::Value {
        serde_json::json!({
            "token_type": "Bearer",
            "access_token": token,
            "expires_in": expires_in,
        })
    }

    async fn cache_against(server: &MockServer) -> TokenCache {
        TokenCache::new("test-id", "test-secret")
            .expect("client should build")
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn valid_cached_token_issues_no_network_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=test-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1", 3600)))
            .expect(1)
            .mount(&server)
            .await;

        let cache = cache_against(&server).await;

        assert_eq!(cache.token().await.unwrap(), "tok-1");
        // Second call must be served from the cache; the mock allows one hit.
        assert_eq!(cache.token().await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn expired_token_triggers_one_exchange_per_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-short", 0)))
            .expect(2)
            .mount(&server)
            .await;

        let cache = cache_against(&server).await;

        // expires_in = 0 means the credential is stale immediately.
        assert_eq!(cache.token().await.unwrap(), "tok-short");
        assert_eq!(cache.token().await.unwrap(), "tok-short");
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_exchange() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body("tok-shared", 3600))
                    .set_delay(std::time::Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cache = Arc::new(cache_against(&server).await);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.token().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "tok-shared");
        }
    }

    #[tokio::test]
    async fn failed_exchange_propagates_and_next_call_retries() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-late", 3600)))
            .mount(&server)
            .await;

        let cache = cache_against(&server).await;

        let err = cache.token().await.unwrap_err();
        assert!(matches!(err, AuthError::Status { .. }));
        assert!(err.to_string().contains("500"));

        // Expiry checks are time-based, not failure-based: the next call
        // attempts a fresh exchange and succeeds.
        assert_eq!(cache.token().await.unwrap(), "tok-late");
    }

    #[tokio::test]
    async fn invalid_credentials_surface_as_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let cache = cache_against(&server).await;

        let err = cache.token().await.unwrap_err();
        assert!(matches!(err, AuthError::Status { .. }));
        assert!(err.to_string().contains("invalid_client"));
    }
}
