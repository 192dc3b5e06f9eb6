//! Type definitions for platform identities and audit records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token presented by a caller
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from an `Authorization` header value.
    ///
    /// A `Bearer ` prefix is stripped when present; any other value is taken
    /// as the token itself and left for the identity service to judge.
    /// Returns `None` for an empty value.
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("bearer") {
            return None;
        }

        let token = match value.get(..7) {
            Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => value[7..].trim_start(),
            _ => value,
        };

        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Platform user resolved from a credential
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallerIdentity {
    /// Stable user id
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// Audited action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A verification session was opened with the provider
    KycSessionCreated,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::KycSessionCreated => "kyc_session_created",
        }
    }
}

/// One row of the audit trail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub user_id: String,
    pub action: AuditAction,
    pub metadata: serde_json::Value,
}

impl AuditRecord {
    /// Record for a newly created verification session
    pub fn kyc_session_created(user_id: &str, session_id: &str, features: &[String]) -> Self {
        Self {
            user_id: user_id.to_string(),
            action: AuditAction::KycSessionCreated,
            metadata: serde_json::json!({
                "session_id": session_id,
                "features": features,
            }),
        }
    }
}
