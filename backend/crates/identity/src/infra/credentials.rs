//! Credential Adapters
//!
//! Binds the domain's `PasswordHasher` and `TokenIssuer` capabilities to the
//! platform primitives. Argon2 is CPU-bound, so hashing and verification run
//! on tokio's blocking pool.

use std::sync::Arc;

use chrono::Duration;
use platform::password::{Argon2Hasher, ClearTextPassword};
use platform::token::JwtSigner;

use crate::application::config::{PasswordConfig, TokenConfig};
use crate::domain::services::{Clock, PasswordHasher, TokenIssuer};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{IdentityError, IdentityResult};

// ============================================================================
// Password hashing
// ============================================================================

/// Argon2id password hasher
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    hasher: Argon2Hasher,
}

impl Argon2PasswordHasher {
    pub fn new(config: &PasswordConfig) -> IdentityResult<Self> {
        let hasher = Argon2Hasher::new(config.argon2, config.pepper.clone())?;
        Ok(Self { hasher })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> IdentityResult<String> {
        let hasher = self.hasher.clone();
        let password = ClearTextPassword::new(plaintext);

        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| IdentityError::Hashing(format!("hashing task failed: {}", e)))??;

        Ok(hashed.into_phc_string())
    }

    async fn verify(&self, plaintext: &str, hash: &str) -> IdentityResult<bool> {
        let hasher = self.hasher.clone();
        let password = ClearTextPassword::new(plaintext);
        let phc = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &phc))
            .await
            .map_err(|e| IdentityError::Hashing(format!("verification task failed: {}", e)))
    }
}

// ============================================================================
// Token issuance
// ============================================================================

/// HS256 JWT issuer
#[derive(Clone)]
pub struct JwtTokenIssuer {
    signer: JwtSigner,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Fails when no secret is configured
    pub fn new(config: &TokenConfig, clock: Arc<dyn Clock>) -> IdentityResult<Self> {
        let ttl = Duration::try_minutes(config.expiry_minutes).ok_or_else(|| {
            IdentityError::Token(format!("expiry out of range: {} minutes", config.expiry_minutes))
        })?;
        let signer = JwtSigner::new(
            &config.secret,
            config.issuer.clone(),
            config.audience.clone(),
            ttl,
        )?;
        Ok(Self { signer, clock })
    }

    pub fn signer(&self) -> &JwtSigner {
        &self.signer
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &UserId, email: &Email) -> IdentityResult<String> {
        Ok(self
            .signer
            .sign(&subject.to_string(), email.as_str(), self.clock.now())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::SystemClock;
    use chrono::{DateTime, Utc};
    use platform::password::Argon2Settings;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fast_config() -> PasswordConfig {
        PasswordConfig {
            argon2: Argon2Settings {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            pepper: None,
        }
    }

    fn token_config() -> TokenConfig {
        TokenConfig {
            secret: b"credentials-test-secret".to_vec(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_hash_twice_differs_and_both_verify() {
        let hasher = Argon2PasswordHasher::new(&fast_config()).unwrap();

        let first = hasher.hash("Secure1!").await.unwrap();
        let second = hasher.hash("Secure1!").await.unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("Secure1!", &first).await.unwrap());
        assert!(hasher.verify("Secure1!", &second).await.unwrap());
        assert!(!hasher.verify("Wrong1!x", &first).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_garbage_hash_is_false() {
        let hasher = Argon2PasswordHasher::new(&fast_config()).unwrap();
        assert!(!hasher.verify("Secure1!", "plaintext").await.unwrap());
    }

    #[test]
    fn test_invalid_work_factor_is_rejected() {
        let mut config = fast_config();
        config.argon2.iterations = 0;
        assert!(matches!(
            Argon2PasswordHasher::new(&config),
            Err(IdentityError::Hashing(_))
        ));
    }

    #[test]
    fn test_issue_uses_clock_and_expiry() {
        let issued_at = Utc::now();
        let issuer = JwtTokenIssuer::new(&token_config(), Arc::new(FixedClock(issued_at))).unwrap();
        let id = UserId::new();
        let email = Email::normalize("ana@x.com");

        let token = issuer.issue(&id, &email).unwrap();

        let claims = issuer.signer().decode(&token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp, issued_at.timestamp() + 3600);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = JwtTokenIssuer::new(&TokenConfig::default(), Arc::new(SystemClock));
        assert!(matches!(result, Err(IdentityError::Token(_))));
    }
}
