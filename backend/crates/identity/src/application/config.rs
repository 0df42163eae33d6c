//! Application Configuration
//!
//! Configuration for the Identity application layer.

use std::fmt;

use platform::password::Argon2Settings;
use platform::token::DEFAULT_TOKEN_TTL_MINUTES;

/// Default address pattern for registration
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Default token issuer claim
pub const DEFAULT_TOKEN_ISSUER: &str = "identity-api";

/// Default token audience claim
pub const DEFAULT_TOKEN_AUDIENCE: &str = "identity-clients";

/// Identity application configuration
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    pub token: TokenConfig,
    pub password: PasswordConfig,
    pub validation: ValidationConfig,
}

impl IdentityConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token: TokenConfig {
                secret,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create config for development (random secret, light Argon2 work factor)
    pub fn development() -> Self {
        Self {
            password: PasswordConfig {
                argon2: Argon2Settings {
                    memory_kib: 8 * 1024,
                    iterations: 1,
                    parallelism: 1,
                },
                pepper: None,
            },
            ..Self::with_random_secret()
        }
    }
}

/// Token signing settings
#[derive(Clone)]
pub struct TokenConfig {
    /// HS256 shared secret; empty means "not configured"
    pub secret: Vec<u8>,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: Vec::new(),
            issuer: DEFAULT_TOKEN_ISSUER.to_string(),
            audience: DEFAULT_TOKEN_AUDIENCE.to_string(),
            expiry_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiry_minutes", &self.expiry_minutes)
            .finish()
    }
}

/// Password hashing settings
#[derive(Clone, Default)]
pub struct PasswordConfig {
    pub argon2: Argon2Settings,
    /// Password pepper (optional, application-wide secret)
    pub pepper: Option<Vec<u8>>,
}

impl fmt::Debug for PasswordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordConfig")
            .field("argon2", &self.argon2)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Request validation settings
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Regex a registration email must match
    pub email_pattern: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            email_pattern: DEFAULT_EMAIL_PATTERN.to_string(),
        }
    }
}
