//! KYC session initiation.
//!
//! Authenticates the caller, opens a hosted verification session with DiDIt
//! and relays the session URL. One provider call per request, no retries.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::Json,
};
use didit_client::{Feature, SessionRequest};
use kyc_platform::AuditRecord;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::{error::ApiError, extractors::AuthenticatedCaller, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Caller-supplied session options. Absent fields fall back to defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionOptions {
    pub callback_url: Option<String>,
    pub features: Option<Vec<Feature>>,
}

impl SessionOptions {
    /// Read options from a request body.
    ///
    /// The body is optional and loosely typed: anything that is not a JSON
    /// object yields no options, and each field is taken only when it has the
    /// expected shape.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            // Malformed bodies are not an error; defaults apply.
            Err(e) => {
                tracing::debug!("Ignoring unparseable request body: {}", e);
                return Self::default();
            }
        };

        let callback_url = value
            .get("callback_url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        let features = value.get("features").and_then(Value::as_array).map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(Feature::from)
                .collect()
        });

        Self {
            callback_url,
            features,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateKycSessionResponse {
    pub success: bool,
    pub url: String,
    pub session_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// OPTIONS /functions/v1/didit-kyc
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than POST or OPTIONS
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// POST /functions/v1/didit-kyc
pub async fn create_kyc_session(
    State(state): State<Arc<AppState>>,
    caller: AuthenticatedCaller,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CreateKycSessionResponse>, ApiError> {
    let user_id = caller.identity.id.as_str();
    tracing::info!(user_id, "Initializing session");

    let credentials = state.config.didit_credentials.as_ref().ok_or_else(|| {
        tracing::error!("Missing DiDIt credentials in configuration");
        ApiError::Configuration("DiDIt credentials not configured")
    })?;

    let options = match body {
        Ok(bytes) => SessionOptions::from_body(&bytes),
        // An unreadable body is treated like an absent one.
        Err(rejection) => {
            tracing::debug!("Ignoring unreadable request body: {}", rejection);
            SessionOptions::default()
        }
    };

    let request = SessionRequest {
        vendor_data: user_id.to_string(),
        callback_url: options
            .callback_url
            .unwrap_or_else(|| state.config.default_callback_url.clone()),
        features: options.features.unwrap_or_else(Feature::defaults),
    };

    let feature_tags: Vec<String> = request.features.iter().map(Feature::to_string).collect();
    tracing::info!(features = %feature_tags.join(", "), "Creating DiDIt session");

    let reply = state
        .verification_provider
        .create_session(credentials, &request)
        .await?;
    let session = didit_client::interpret_reply(reply)?;

    tracing::info!(session_id = %session.session_id, "Session created successfully");

    let record = AuditRecord::kyc_session_created(user_id, &session.session_id, &feature_tags);
    // Audit failures are logged only; the session already exists.
    if let Err(e) = state.audit_log.append(&caller.credential, &record).await {
        tracing::error!(user_id, error = %e, "Failed to log audit entry");
    }

    Ok(Json(CreateKycSessionResponse {
        success: true,
        url: session.url,
        session_id: session.session_id,
    }))
}
