use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Deployment is missing a required secret
    #[error("Configuration error: {0}")]
    Configuration(&'static str),

    /// Verification provider rejected or failed the call
    #[error("Provider error ({status}): {details}")]
    Provider {
        status: StatusCode,
        details: String,
        status_code: u16,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<didit_client::Error> for ApiError {
    fn from(error: didit_client::Error) -> Self {
        match error {
            didit_client::Error::Rejected { status, detail } => ApiError::Provider {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                details: detail,
                status_code: status,
            },
            didit_client::Error::MalformedResponse { status, source } => {
                tracing::error!(status, error = %source, "DiDIt returned an unreadable session");
                ApiError::Provider {
                    status: StatusCode::BAD_GATEWAY,
                    details: "Invalid session response from verification provider".to_string(),
                    status_code: status,
                }
            }
            other => ApiError::Internal(
                anyhow::Error::new(other).context("Failed to reach verification provider"),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse {
                    error: "Method not allowed",
                    details: Some("Only POST requests are accepted".to_string()),
                    status_code: None,
                },
            ),
            ApiError::Unauthorized(details) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "Unauthorized",
                    details: Some(details.to_string()),
                    status_code: None,
                },
            ),
            ApiError::Configuration(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Configuration error",
                    details: Some(details.to_string()),
                    status_code: None,
                },
            ),
            ApiError::Provider {
                status,
                details,
                status_code,
            } => {
                tracing::error!(status_code, details = %details, "DiDIt API error");
                (
                    status,
                    ErrorResponse {
                        error: "DiDIt API Error",
                        details: Some(details),
                        status_code: Some(status_code),
                    },
                )
            }
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error",
                        // Top-level context only; the chain may name upstream hosts.
                        details: Some(err.to_string()),
                        status_code: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Map a handler panic to the internal error envelope
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Unknown error occurred".to_string()
    };

    tracing::error!(details = %details, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error",
            details: Some(details),
            status_code: None,
        }),
    )
        .into_response()
}
