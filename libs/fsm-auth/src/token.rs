//! HS256 bearer tokens.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::errors::AuthError;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issues and validates access tokens with a shared HMAC secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    /// Sign a token for `user_id` that expires after the configured ttl.
    ///
    /// # Errors
    /// Returns `AuthError::Crypto` if signing fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = OffsetDateTime::now_utc();
        self.issue_at(user_id, now)
    }

    fn issue_at(&self, user_id: Uuid, now: OffsetDateTime) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
    }

    /// Verify signature and expiry and return the subject.
    ///
    /// # Errors
    /// `TokenExpired` for expired tokens, `InvalidToken` for anything else
    /// (bad signature, malformed token, missing or non-uuid subject).
    pub fn validate(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp"]);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            },
        )?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(format!("bad subject: {e}")))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: secret.to_owned(),
            token_ttl_hours: 24,
        })
    }

    #[test]
    fn token_roundtrip_returns_subject() {
        let svc = service("s3cret");
        let user = Uuid::new_v4();
        let token = svc.issue(user).unwrap();
        assert_eq!(svc.validate(&token).unwrap(), user);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = service("a").issue(Uuid::new_v4()).unwrap();
        assert!(matches!(
            service("b").validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service("s3cret");
        let issued = OffsetDateTime::now_utc() - Duration::hours(25);
        let token = svc.issue_at(Uuid::new_v4(), issued).unwrap();
        assert!(matches!(svc.validate(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn expiry_is_a_day_after_issuance() {
        let svc = service("s3cret");
        let token = svc.issue(Uuid::new_v4()).unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let data =
            jsonwebtoken::decode::<Claims>(&token, &DecodingKey::from_secret(b""), &validation)
                .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 24 * 3600);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            service("s3cret").validate("not.a.token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn missing_subject_is_rejected() {
        #[derive(Serialize)]
        struct NoSub {
            exp: i64,
        }
        let exp = (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoSub { exp },
            &EncodingKey::from_secret(b"s3cret"),
        )
        .unwrap();
        assert!(matches!(
            service("s3cret").validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
