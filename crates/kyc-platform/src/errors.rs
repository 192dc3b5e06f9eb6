//! Error types for platform backend access.

use thiserror::Error;

/// Result type alias for platform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Platform backend errors
#[derive(Debug, Error)]
pub enum Error {
    /// Backend answered with a non-success status
    #[error("Platform request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// Identity service returned no usable user
    #[error("No identity returned for credential")]
    MissingIdentity,

    /// Backend URL could not be built
    #[error("Invalid platform URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
