//! # kyc-platform
//!
//! Access to the platform backend used by the KYC session service.
//!
//! ## Responsibilities
//!
//! - Resolve a caller's identity from a bearer credential
//! - Append audit records for security-relevant actions

mod client;
pub mod errors;
pub mod traits;
pub mod types;

pub use client::{PlatformClient, AUDIT_LOG_PATH, USER_PATH};
pub use errors::{Error, Result};
pub use traits::{AuditLog, IdentityResolver, NoOpAuditLog};
pub use types::*;
