use axum::{async_trait, extract::FromRequestParts, http::{header, request::Parts}};
use kyc_platform::{CallerIdentity, Credential};
use std::sync::Arc;

use crate::{error::ApiError, state::AppState};

/// Extractor for authenticated requests
///
/// Presents the bearer credential to the identity service. Resolution
/// failures are logged and reported to the caller only as an invalid token.
pub struct AuthenticatedCaller {
    pub identity: CallerIdentity,
    pub credential: Credential,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(ApiError::Unauthorized("Missing authorization header"))?;

        // Present but unusable (not text, or no token) reads as a bad token.
        let credential = value
            .to_str()
            .ok()
            .and_then(Credential::from_header)
            .ok_or_else(|| {
                tracing::warn!("Unusable authorization header");
                ApiError::Unauthorized("Invalid or expired token")
            })?;

        let identity = state
            .identity_resolver
            .resolve(&credential)
            .await
            .map_err(|e| {
                tracing::warn!("User verification failed: {}", e);
                ApiError::Unauthorized("Invalid or expired token")
            })?;

        Ok(AuthenticatedCaller {
            identity,
            credential,
        })
    }
}
