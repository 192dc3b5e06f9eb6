use anyhow::{Context, Result};
use didit_client::{DiditClient, VerificationProvider};
use kyc_platform::{AuditLog, IdentityResolver, NoOpAuditLog, PlatformClient};
use std::sync::Arc;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub identity_resolver: Arc<dyn IdentityResolver>,
    pub verification_provider: Arc<dyn VerificationProvider>,
    pub audit_log: Arc<dyn AuditLog>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http_client = builder.build().context("Failed to build HTTP client")?;

        let platform = Arc::new(
            PlatformClient::new(
                http_client.clone(),
                &config.platform_url,
                config.platform_anon_key.clone(),
            )
            .context("Invalid platform URL")?,
        );

        let provider = Arc::new(
            DiditClient::new(http_client, &config.didit_base_url)
                .context("Invalid DiDIt base URL")?,
        );

        let audit_log: Arc<dyn AuditLog> = if config.audit_log_enabled {
            platform.clone()
        } else {
            tracing::warn!("Audit logging disabled");
            Arc::new(NoOpAuditLog)
        };

        if config.didit_credentials.is_none() {
            tracing::warn!("DIDIT_APP_ID or DIDIT_API_KEY not set; session requests will fail");
        }

        Ok(Self::with_services(config, platform, provider, audit_log))
    }

    pub fn with_services(
        config: Config,
        identity_resolver: Arc<dyn IdentityResolver>,
        verification_provider: Arc<dyn VerificationProvider>,
        audit_log: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            config,
            identity_resolver,
            verification_provider,
            audit_log,
        }
    }
}
