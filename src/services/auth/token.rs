use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default access-token lifetime: 5 hours.
pub const DEFAULT_TTL_SECONDS: u64 = 5 * 60 * 60;

// Errors returned by token issuance and verification.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("empty bearer token")]
    EmptyToken,
    #[error("empty 'email' claim")]
    EmptyEmail,
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Access token (JWT) claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 access-token issuer/verifier bound to the process-wide secret.
///
/// - Key material is intentionally not printable via Debug.
/// - Leeway is zero: a token is rejected as soon as `exp` has passed.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX / 1_000)),
        }
    }

    /// Issue an access token for `email`, valid for the configured TTL from now.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue an access token as if it were created at `issued_at`.
    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        if email.trim().is_empty() {
            return Err(TokenError::EmptyEmail);
        }

        let claims = AccessTokenClaims {
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }

    /// Verify signature + expiry, then return the decoded claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::EmptyToken);
        }

        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.email.trim().is_empty() {
            return Err(TokenError::EmptyEmail);
        }

        Ok(data.claims)
    }
}

/// Token part of an `Authorization` header value: the second whitespace-separated
/// segment, or `""` when there is none. The scheme word is not checked.
pub fn bearer_token(header_value: &str) -> &str {
    header_value.split_whitespace().nth(1).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_verifies_and_carries_email() {
        let svc = TokenService::new(SECRET, DEFAULT_TTL_SECONDS);
        let token = svc.issue("a@example.com").unwrap();

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.exp - claims.iat, 5 * 60 * 60);
    }

    #[test]
    fn token_is_valid_just_before_five_hours() {
        let svc = TokenService::new(SECRET, DEFAULT_TTL_SECONDS);
        let issued_at = Utc::now() - Duration::hours(5) + Duration::seconds(30);
        let token = svc.issue_at("a@example.com", issued_at).unwrap();

        assert!(svc.verify(&token).is_ok());
    }

    #[test]
    fn token_is_expired_just_after_five_hours() {
        let svc = TokenService::new(SECRET, DEFAULT_TTL_SECONDS);
        let issued_at = Utc::now() - Duration::hours(5) - Duration::seconds(30);
        let token = svc.issue_at("a@example.com", issued_at).unwrap();

        match svc.verify(&token) {
            Err(TokenError::Jwt(e)) => assert_eq!(e.kind(), &ErrorKind::ExpiredSignature),
            other => panic!("expected expired signature, got {other:?}"),
        }
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = TokenService::new("other-secret", DEFAULT_TTL_SECONDS);
        let token = issuer.issue("a@example.com").unwrap();

        let svc = TokenService::new(SECRET, DEFAULT_TTL_SECONDS);
        assert!(matches!(svc.verify(&token), Err(TokenError::Jwt(_))));
    }

    #[test]
    fn garbage_and_empty_tokens_are_rejected() {
        let svc = TokenService::new(SECRET, DEFAULT_TTL_SECONDS);
        assert!(matches!(svc.verify("abc.def.ghi"), Err(TokenError::Jwt(_))));
        assert!(matches!(svc.verify("not-a-jwt"), Err(TokenError::Jwt(_))));
        assert!(matches!(svc.verify(""), Err(TokenError::EmptyToken)));
    }

    #[test]
    fn issuing_for_blank_email_fails() {
        let svc = TokenService::new(SECRET, DEFAULT_TTL_SECONDS);
        assert!(matches!(svc.issue("  "), Err(TokenError::EmptyEmail)));
    }

    #[test]
    fn bearer_token_takes_second_segment() {
        assert_eq!(bearer_token("Bearer abc"), "abc");
        assert_eq!(bearer_token("Bearer   abc  extra"), "abc");
        assert_eq!(bearer_token("Bearer"), "");
        assert_eq!(bearer_token(""), "");
        assert_eq!(bearer_token("Token xyz"), "xyz");
    }

    #[test]
    fn debug_does_not_leak_the_secret() {
        let svc = TokenService::new("super-secret-value", DEFAULT_TTL_SECONDS);
        assert!(!format!("{svc:?}").contains("super-secret-value"));
    }
}
