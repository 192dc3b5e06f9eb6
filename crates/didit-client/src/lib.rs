//! # didit-client
//!
//! Client for the DiDIt identity-verification provider.
//!
//! ## Responsibilities
//!
//! - Provider wire types (session request and response)
//! - Session creation over HTTP
//! - Interpretation of provider replies, including best-effort extraction of
//!   a human-readable detail from error bodies

mod client;
pub mod detail;
pub mod errors;
pub mod traits;
pub mod types;

pub use client::{DiditClient, DEFAULT_BASE_URL, SESSIONS_PATH};
pub use errors::{Error, Result};
pub use traits::VerificationProvider;
pub use types::*;

/// Turn a raw provider reply into a session, or the error the caller should see.
///
/// Non-2xx replies become [`Error::Rejected`] carrying the provider's status
/// and the first detail string found in the body. A 2xx reply whose body is
/// not a session record becomes [`Error::MalformedResponse`].
pub fn interpret_reply(reply: ProviderReply) -> Result<SessionResponse> {
    if !reply.is_success() {
        return Err(Error::Rejected {
            status: reply.status,
            detail: detail::extract_detail(&reply.body),
        });
    }

    serde_json::from_str(&reply.body).map_err(|source| Error::MalformedResponse {
        status: reply.status,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_created_session() {
        let reply = ProviderReply::new(201, r#"{"url":"https://x","session_id":"s1"}"#);
        let session = interpret_reply(reply).unwrap();

        assert_eq!(session.url, "https://x");
        assert_eq!(session.session_id, "s1");
    }

    #[test]
    fn test_interpret_ignores_extra_fields() {
        let reply = ProviderReply::new(
            200,
            r#"{"url":"https://x","session_id":"s1","status":"Not Started","session_token":"t"}"#,
        );
        assert_eq!(interpret_reply(reply).unwrap().session_id, "s1");
    }

    #[test]
    fn test_interpret_rejection_uses_detail() {
        let reply = ProviderReply::new(422, r#"{"detail":"bad doc"}"#);

        match interpret_reply(reply) {
            Err(Error::Rejected { status, detail }) => {
                assert_eq!(status, 422);
                assert_eq!(detail, "bad doc");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_rejection_with_plain_text_body() {
        let reply = ProviderReply::new(503, "upstream unavailable");

        match interpret_reply(reply) {
            Err(Error::Rejected { status, detail }) => {
                assert_eq!(status, 503);
                assert_eq!(detail, "upstream unavailable");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_malformed_success_body() {
        let reply = ProviderReply::new(201, "<html>created</html>");

        match interpret_reply(reply) {
            Err(Error::MalformedResponse { status, .. }) => assert_eq!(status, 201),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_success_missing_session_id() {
        let reply = ProviderReply::new(201, r#"{"url":"https://x"}"#);
        assert!(matches!(
            interpret_reply(reply),
            Err(Error::MalformedResponse { .. })
        ));
    }
}
