//! Trait definitions for the provider client.

use crate::types::{DiditCredentials, ProviderReply, SessionRequest};
use crate::Result;
use async_trait::async_trait;

/// Verification provider transport
///
/// Implementations send exactly one request and return the provider's reply
/// as received. Deciding whether the reply is a success is left to
/// [`crate::interpret_reply`].
#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Create a hosted verification session
    ///
    /// # Errors
    /// * `Http` - The provider could not be reached or the body could not be read
    async fn create_session(
        &self,
        credentials: &DiditCredentials,
        request: &SessionRequest,
    ) -> Result<ProviderReply>;
}
