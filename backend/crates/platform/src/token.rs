//! Bearer Token Signing
//!
//! HS256 JSON Web Tokens carrying subject, email, issuer, audience,
//! issued-at and expiry. Signing is local and synchronous; the shared secret
//! is configured once at startup.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Claims embedded in every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// No signing secret configured
    #[error("Token signing secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime must be positive")]
    InvalidLifetime,

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// HS256 signer bound to one issuer/audience pair
#[derive(Clone)]
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtSigner {
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidLifetime);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl,
        })
    }

    /// Sign a token for `subject`, valid from `issued_at` for the configured lifetime
    pub fn sign(
        &self,
        subject: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: subject.to_string(),
            email: email.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify signature, issuer, audience and expiry, returning the claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        Ok(decode::<TokenClaims>(token, &self.decoding, &validation)?.claims)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_minutes", &self.ttl.num_minutes())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
