//! Session credentials for the journal API.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Bearer credential pair for the journal API.
///
/// Presence of an access token is what defines "authenticated"; absence
/// means the session is gone and callers hit the API unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
}

impl Credential {
    /// Create a credential from a token pair.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Whether this credential can authenticate requests.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Extract the `exp` claim from a JWT access token.
///
/// Returns `None` when the token is not a decodable JWT; callers fall back
/// to a fixed refresh interval in that case. The signature is not verified,
/// the client only needs the expiry hint.
#[must_use]
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    Utc.timestamp_opt(exp, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user-1","exp":{exp}}}"#));
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn expiry_extracted_from_jwt_payload() {
        let token = jwt_with_exp(1_700_000_000);
        let expiry = token_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_700_000_000);
    }

    #[test]
    fn opaque_tokens_have_no_expiry() {
        assert!(token_expiry("not-a-jwt").is_none());
        assert!(token_expiry("").is_none());
        assert!(token_expiry("a.b.c").is_none());
    }

    #[test]
    fn expiry_missing_claim_is_none() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"user-1"}"#);
        assert!(token_expiry(&format!("{header}.{payload}.sig")).is_none());
    }

    #[test]
    fn empty_access_token_is_unauthenticated() {
        assert!(!Credential::new("", "refresh").is_authenticated());
        assert!(Credential::new("token", "refresh").is_authenticated());
    }
}
