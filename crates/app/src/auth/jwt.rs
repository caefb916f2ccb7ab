//! Bearer tokens: HS256 JWTs carrying the user and role.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use dormitory::users::{UserRole, UserUuid};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(30 * 24);

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User UUID.
    pub sub: Uuid,
    /// Role at issue time.
    pub role: UserRole,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime out of range")]
    Lifetime,
}

/// Issues and checks bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &str, ttl: SignedDuration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign a token for `user` valid from `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows or signing fails.
    pub fn issue(
        &self,
        user: UserUuid,
        role: UserRole,
        now: Timestamp,
    ) -> Result<String, TokenError> {
        let expires = now.checked_add(self.ttl).map_err(|_err| TokenError::Lifetime)?;

        let claims = Claims {
            sub: user.into_uuid(),
            role,
            iat: now.as_second(),
            exp: expires.as_second(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    /// Verify a token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for stale tokens and
    /// [`TokenError::Invalid`] for anything else that fails validation.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(error),
            })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn issued_tokens_round_trip_claims() -> TestResult {
        let signer = TokenSigner::new("secret", DEFAULT_TOKEN_TTL);
        let user = UserUuid::new();
        let now = Timestamp::now();

        let claims = signer.decode(&signer.issue(user, UserRole::Admin, now)?)?;

        assert_eq!(claims.sub, user.into_uuid());
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 3600);

        Ok(())
    }

    #[test]
    fn expired_tokens_are_rejected() -> TestResult {
        let signer = TokenSigner::new("secret", DEFAULT_TOKEN_TTL);
        let issued = Timestamp::now() - SignedDuration::from_hours(31 * 24);

        let token = signer.issue(UserUuid::new(), UserRole::Tenant, issued)?;

        assert!(matches!(signer.decode(&token), Err(TokenError::Expired)));

        Ok(())
    }

    #[test]
    fn tokens_from_another_secret_are_invalid() -> TestResult {
        let ours = TokenSigner::new("secret", DEFAULT_TOKEN_TTL);
        let theirs = TokenSigner::new("other", DEFAULT_TOKEN_TTL);

        let token = theirs.issue(UserUuid::new(), UserRole::Admin, Timestamp::now())?;

        assert!(matches!(ours.decode(&token), Err(TokenError::Invalid(_))));
        assert!(matches!(ours.decode("garbage"), Err(TokenError::Invalid(_))));

        Ok(())
    }
}
