//! Signed, time-bounded access tokens.
//!
//! HS256 JWTs whose `sub` claim is the user id. The signing keys are built
//! once at startup and shared through `AppState`.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use shoplite_core::UserId;

/// Errors from token issuing or verification.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,

    /// The token is malformed, has a bad signature, or carries an
    /// unusable subject.
    #[error("invalid token")]
    Invalid,

    /// Signing failed.
    #[error("token encoding failed")]
    Encoding,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's id.
    pub sub: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expires at (Unix timestamp).
    pub exp: i64,
}

/// Issues and verifies access tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Build a token service from the configured signing secret and lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl,
        }
    }

    /// Issue a token for a user, valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        #[allow(clippy::cast_possible_wrap)] // Token lifetimes are far below i64::MAX seconds
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Encoding)
    }

    /// Verify a token and return the subject user id.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for outdated tokens and
    /// `TokenError::Invalid` for everything else that fails validation.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(ttl: Duration) -> TokenService {
        TokenService::new(&SecretString::from("k9#mQ2$vX7!pL4@wZ8&nB5^dF1*gH3%j"), ttl)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let tokens = service(Duration::from_secs(3600));
        let token = tokens.issue(UserId::new(42)).unwrap();

        let subject = tokens.verify(&token).unwrap();
        assert_eq!(subject, UserId::new(42));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let tokens = service(Duration::from_secs(3600));
        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let issuer = service(Duration::from_secs(3600));
        let verifier = TokenService::new(
            &SecretString::from("t6&rE9#yU2$iO5!pA8@sD1^fG4*hJ7%k"),
            Duration::from_secs(3600),
        );

        let token = issuer.issue(UserId::new(1)).unwrap();
        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_expired() {
        // jsonwebtoken applies default leeway of 60s; move well past it.
        let tokens = service(Duration::from_secs(0));
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "7".to_string(),
            iat: now - 600,
            exp: now - 300,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"k9#mQ2$vX7!pL4@wZ8&nB5^dF1*gH3%j"),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }
}
