//! reqwest-backed platform client.

use crate::traits::{AuditLog, IdentityResolver};
use crate::types::{AuditRecord, CallerIdentity, Credential};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

/// Auth API endpoint returning the user behind a token
pub const USER_PATH: &str = "auth/v1/user";

/// REST endpoint of the audit table
pub const AUDIT_LOG_PATH: &str = "rest/v1/audit_log";

/// Join `path` below `base_url`, keeping any path prefix the base carries
fn endpoint(base_url: &Url, path: &str) -> Result<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    Ok(base.join(path)?)
}

/// HTTP client for the platform auth and REST APIs
#[derive(Clone)]
pub struct PlatformClient {
    http_client: Client,
    user_url: Url,
    audit_log_url: Url,
    anon_key: String,
}

impl PlatformClient {
    pub fn new(http_client: Client, base_url: &Url, anon_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http_client,
            user_url: endpoint(base_url, USER_PATH)?,
            audit_log_url: endpoint(base_url, AUDIT_LOG_PATH)?,
            anon_key: anon_key.into(),
        })
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("user_url", &self.user_url.as_str())
            .field("audit_log_url", &self.audit_log_url.as_str())
            .finish_non_exhaustive()
    }
}

async fn reject_unless_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl IdentityResolver for PlatformClient {
    async fn resolve(&self, credential: &Credential) -> Result<CallerIdentity> {
        let response = self
            .http_client
            .get(self.user_url.clone())
            .header("apikey", &self.anon_key)
            .bearer_auth(credential.token())
            .send()
            .await?;

        let body = reject_unless_success(response).await?.text().await?;

        let identity: CallerIdentity =
            serde_json::from_str(&body).map_err(|_| Error::MissingIdentity)?;
        if identity.id.is_empty() {
            return Err(Error::MissingIdentity);
        }

        Ok(identity)
    }
}

#[async_trait]
impl AuditLog for PlatformClient {
    async fn append(&self, credential: &Credential, record: &AuditRecord) -> Result<()> {
        let response = self
            .http_client
            .post(self.audit_log_url.clone())
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(credential.token())
            .json(record)
            .send()
            .await?;

        reject_unless_success(response).await?;
        Ok(())
    }
}
