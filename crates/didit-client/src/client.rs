//! reqwest-backed provider client.

use crate::traits::VerificationProvider;
use crate::types::{DiditCredentials, ProviderReply, SessionRequest};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Production DiDIt verification endpoint
pub const DEFAULT_BASE_URL: &str = "https://verification.didit.me";

/// Session creation path, relative to the base URL
pub const SESSIONS_PATH: &str = "api/v3/sessions";

/// Join `path` below `base_url`, keeping any path prefix the base carries
fn endpoint(base_url: &Url, path: &str) -> Result<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    Ok(base.join(path)?)
}

/// HTTP client for the DiDIt session API
#[derive(Debug, Clone)]
pub struct DiditClient {
    http_client: Client,
    sessions_url: Url,
}

impl DiditClient {
    /// Create a client for the given base URL
    pub fn new(http_client: Client, base_url: &Url) -> Result<Self> {
        let sessions_url = endpoint(base_url, SESSIONS_PATH)?;
        Ok(Self {
            http_client,
            sessions_url,
        })
    }

    pub fn sessions_url(&self) -> &Url {
        &self.sessions_url
    }
}

#[async_trait]
impl VerificationProvider for DiditClient {
    async fn create_session(
        &self,
        credentials: &DiditCredentials,
        request: &SessionRequest,
    ) -> Result<ProviderReply> {
        let response = self
            .http_client
            .post(self.sessions_url.clone())
            .bearer_auth(&credentials.api_key)
            .header("X-App-Id", &credentials.app_id)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        // Read the body whatever the status; it is needed for diagnostics either way.
        let body = response.text().await?;

        tracing::debug!(status, "DiDIt API response status");
        tracing::debug!(body = %body, "DiDIt API response body");

        Ok(ProviderReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Feature;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Option<(HeaderMap, serde_json::Value)>>>;

    async fn spawn_provider(status: u16, body: &'static str) -> (Url, Captured) {
        let captured: Captured = Arc::new(Mutex::new(None));
        let sink = captured.clone();

        let app = Router::new().route(
            &format!("/{}", SESSIONS_PATH),
            post(move |headers: HeaderMap, Json(payload): Json<serde_json::Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some((headers, payload));
                    (
                        axum::http::StatusCode::from_u16(status).unwrap(),
                        body,
                    )
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), captured)
    }

    fn credentials() -> DiditCredentials {
        DiditCredentials {
            app_id: "app-123".to_string(),
            api_key: "key-456".to_string(),
        }
    }

    fn request() -> SessionRequest {
        SessionRequest {
            vendor_data: "user-1".to_string(),
            callback_url: "https://example.com/cb".to_string(),
            features: vec![Feature::IdDocument],
        }
    }

    #[test]
    fn test_sessions_url_join() {
        let base = Url::parse("https://verification.didit.me").unwrap();
        let client = DiditClient::new(Client::new(), &base).unwrap();
        assert_eq!(
            client.sessions_url().as_str(),
            "https://verification.didit.me/api/v3/sessions"
        );
    }

    #[test]
    fn test_sessions_url_keeps_base_path() {
        for base in ["https://gw.example.com/didit", "https://gw.example.com/didit/"] {
            let base = Url::parse(base).unwrap();
            let client = DiditClient::new(Client::new(), &base).unwrap();
            assert_eq!(
                client.sessions_url().as_str(),
                "https://gw.example.com/didit/api/v3/sessions"
            );
        }
    }

    #[tokio::test]
    async fn test_create_session_sends_credentials_and_body() {
        let (base, captured) =
            spawn_provider(201, r#"{"url":"https://x","session_id":"s1"}"#).await;
        let client = DiditClient::new(Client::new(), &base).unwrap();

        let reply = client.create_session(&credentials(), &request()).await.unwrap();
        assert_eq!(reply.status, 201);
        assert_eq!(reply.body, r#"{"url":"https://x","session_id":"s1"}"#);

        let (headers, payload) = captured.lock().unwrap().take().unwrap();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer key-456");
        assert_eq!(headers.get("x-app-id").unwrap(), "app-123");
        assert_eq!(payload["vendor_data"], "user-1");
        assert_eq!(payload["features"], serde_json::json!(["id_document"]));
    }

    #[tokio::test]
    async fn test_create_session_returns_error_replies() {
        let (base, _captured) = spawn_provider(422, r#"{"detail":"bad doc"}"#).await;
        let client = DiditClient::new(Client::new(), &base).unwrap();

        let reply = client.create_session(&credentials(), &request()).await.unwrap();
        assert_eq!(reply.status, 422);
        assert_eq!(reply.body, r#"{"detail":"bad doc"}"#);
    }
}
