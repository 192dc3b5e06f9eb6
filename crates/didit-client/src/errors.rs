//! Error types for the provider client.

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Provider client errors
#[derive(Debug, Error)]
pub enum Error {
    /// Provider answered with a non-success status
    #[error("Provider rejected session request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// Provider answered with a success status but an unreadable body
    #[error("Provider returned an invalid session response ({status})")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Provider base URL could not be used
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP request failed before a reply was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
