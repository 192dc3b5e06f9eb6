//! Trait definitions for platform backend access.

use crate::types::{AuditRecord, CallerIdentity, Credential};
use crate::Result;
use async_trait::async_trait;

/// Resolves bearer credentials to platform users
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the caller behind a credential
    ///
    /// # Errors
    /// * `Rejected` - Token is invalid or expired
    /// * `MissingIdentity` - Service answered without a user id
    /// * `Http` - Service unreachable
    async fn resolve(&self, credential: &Credential) -> Result<CallerIdentity>;
}

/// Append-only audit trail
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append one record, written on behalf of the credential's owner
    async fn append(&self, credential: &Credential, record: &AuditRecord) -> Result<()>;
}

/// Audit log that discards every record
pub struct NoOpAuditLog;

#[async_trait]
impl AuditLog for NoOpAuditLog {
    async fn append(&self, _credential: &Credential, record: &AuditRecord) -> Result<()> {
        tracing::trace!(action = record.action.as_str(), "Audit logging disabled, record dropped");
        Ok(())
    }
}
