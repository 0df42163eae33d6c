//! Password Hashing and Verification
//!
//! Argon2id password handling with:
//! - Fresh random salt per hash (two hashes of one password never match)
//! - Tunable work factor (memory, iterations, parallelism)
//! - Zeroization of sensitive data
//! - Constant-time comparison (delegated to the argon2 verifier)
//!
//! Policy rules (length, character classes) are not enforced here; they belong
//! to request validation.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Work-factor parameters rejected by argon2
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParameters(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// Unicode is normalized using NFKC so that visually identical input hashes
/// the same way on every platform.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().nfkc().collect())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string embeds algorithm, version, parameters and salt, so a hash
/// produced under older work-factor settings still verifies after tuning.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Argon2 Hasher
// ============================================================================

/// Argon2id work-factor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Settings {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher with an optional application-wide pepper
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl Argon2Hasher {
    pub fn new(settings: Argon2Settings, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| PasswordHashError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            params,
            pepper: pepper.map(Zeroizing::new),
        })
    }

    /// Hash with a freshly generated 128-bit salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let input = self.peppered(password);

        let hash = self
            .argon2()
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored PHC string
    ///
    /// Malformed hashes verify as `false`; this never fails.
    pub fn verify(&self, password: &ClearTextPassword, phc: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(phc) else {
            return false;
        };
        let input = self.peppered(password);

        // Argon2 uses constant-time comparison internally
        self.argon2().verify_password(&input, &parsed_hash).is_ok()
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(password.as_bytes().to_vec());
        if let Some(pepper) = &self.pepper {
            combined.extend_from_slice(pepper);
        }
        combined
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("memory_kib", &self.params.m_cost())
            .field("iterations", &self.params.t_cost())
            .field("parallelism", &self.params.p_cost())
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
