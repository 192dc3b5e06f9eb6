//! Type definitions for DiDIt verification sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Features requested when the caller does not choose any
pub const DEFAULT_FEATURES: [Feature; 3] = [Feature::IdDocument, Feature::FaceMatch, Feature::Liveness];

/// Verification capability requested for a session
///
/// Unknown tags are carried through unchanged so that new provider
/// capabilities need no client release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Feature {
    /// Identity document check
    IdDocument,

    /// Selfie against document photo
    FaceMatch,

    /// Liveness check
    Liveness,

    /// Any other provider tag
    Other(String),
}

impl Feature {
    pub fn as_str(&self) -> &str {
        match self {
            Feature::IdDocument => "id_document",
            Feature::FaceMatch => "face_match",
            Feature::Liveness => "liveness",
            Feature::Other(tag) => tag,
        }
    }

    /// The default feature set as an owned list
    pub fn defaults() -> Vec<Feature> {
        DEFAULT_FEATURES.to_vec()
    }
}

impl From<String> for Feature {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "id_document" => Feature::IdDocument,
            "face_match" => Feature::FaceMatch,
            "liveness" => Feature::Liveness,
            _ => Feature::Other(tag),
        }
    }
}

impl From<&str> for Feature {
    fn from(tag: &str) -> Self {
        Feature::from(tag.to_string())
    }
}

impl From<Feature> for String {
    fn from(feature: Feature) -> Self {
        match feature {
            Feature::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider application credentials
#[derive(Clone)]
pub struct DiditCredentials {
    /// Application identifier sent as `X-App-Id`
    pub app_id: String,

    /// API key sent as a bearer token
    pub api_key: String,
}

impl fmt::Debug for DiditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiditCredentials")
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Session creation request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRequest {
    /// Caller identifier used to correlate the session with a platform user
    pub vendor_data: String,

    /// Where the provider redirects once the flow completes
    pub callback_url: String,

    pub features: Vec<Feature>,
}

/// Session created by the provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionResponse {
    /// Hosted verification URL for the end user
    pub url: String,

    pub session_id: String,
}

/// Provider reply as received, before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
}

impl ProviderReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the provider reported a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_tags() {
        let features: Vec<Feature> =
            serde_json::from_str(r#"["id_document","liveness","aml_screening"]"#).unwrap();

        assert_eq!(
            features,
            vec![
                Feature::IdDocument,
                Feature::Liveness,
                Feature::Other("aml_screening".to_string()),
            ]
        );
        assert_eq!(
            serde_json::to_string(&features).unwrap(),
            r#"["id_document","liveness","aml_screening"]"#
        );
    }

    #[test]
    fn test_session_request_wire_shape() {
        let request = SessionRequest {
            vendor_data: "user-1".to_string(),
            callback_url: "https://example.com/cb".to_string(),
            features: Feature::defaults(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "vendor_data": "user-1",
                "callback_url": "https://example.com/cb",
                "features": ["id_document", "face_match", "liveness"],
            })
        );
    }

    #[test]
    fn test_credentials_debug_hides_api_key() {
        let credentials = DiditCredentials {
            app_id: "app".to_string(),
            api_key: "sk_live_secret".to_string(),
        };

        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("app"));
        assert!(!rendered.contains("sk_live_secret"));
    }

    #[test]
    fn test_reply_success_range() {
        assert!(ProviderReply::new(200, "").is_success());
        assert!(ProviderReply::new(201, "").is_success());
        assert!(!ProviderReply::new(302, "").is_success());
        assert!(!ProviderReply::new(422, "").is_success());
    }
}
