//! Server configuration loaded from the environment
//!
//! Everything except `JWT_SECRET` has a default. A missing or empty secret
//! aborts startup.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, bail};
use identity::config::{IdentityConfig, PasswordConfig, TokenConfig, ValidationConfig};
use identity::config::{DEFAULT_EMAIL_PATTERN, DEFAULT_TOKEN_AUDIENCE, DEFAULT_TOKEN_ISSUER};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub identity: IdentityConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = match var("JWT_SECRET") {
            Some(secret) => secret.into_bytes(),
            None => bail!("JWT_SECRET must be set"),
        };

        let token = TokenConfig {
            secret,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| DEFAULT_TOKEN_ISSUER.to_string()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_TOKEN_AUDIENCE.to_string()),
            expiry_minutes: parse::<i64>(&var, "JWT_EXPIRY_MINUTES")?
                .unwrap_or(TokenConfig::default().expiry_minutes),
        };

        let mut password = PasswordConfig {
            pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            ..Default::default()
        };
        if let Some(memory_kib) = parse::<u32>(&var, "ARGON2_MEMORY_KIB")? {
            password.argon2.memory_kib = memory_kib;
        }
        if let Some(iterations) = parse::<u32>(&var, "ARGON2_ITERATIONS")? {
            password.argon2.iterations = iterations;
        }
        if let Some(parallelism) = parse::<u32>(&var, "ARGON2_PARALLELISM")? {
            password.argon2.parallelism = parallelism;
        }

        let validation = ValidationConfig {
            email_pattern: var("EMAIL_PATTERN").unwrap_or_else(|| DEFAULT_EMAIL_PATTERN.to_string()),
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            frontend_origins,
            identity: IdentityConfig {
                token,
                password,
                validation,
            },
        })
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{} has an invalid value: {:?}", key, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        assert!(load(&[]).is_err());
        assert!(load(&[("JWT_SECRET", "   ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:31113".parse::<SocketAddr>().unwrap());
        assert!(config.database_url.is_none());
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.identity.token.secret, b"s3cret".to_vec());
        assert_eq!(config.identity.token.expiry_minutes, 60);
        assert_eq!(config.identity.token.issuer, DEFAULT_TOKEN_ISSUER);
        assert!(config.identity.password.pepper.is_none());
        assert_eq!(config.identity.validation.email_pattern, DEFAULT_EMAIL_PATTERN);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRY_MINUTES", "15"),
            ("JWT_ISSUER", "issuer"),
            ("ARGON2_MEMORY_KIB", "4096"),
            ("PASSWORD_PEPPER", "pepper"),
            ("DATABASE_URL", "postgres://localhost/identity"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();

        assert_eq!(config.identity.token.expiry_minutes, 15);
        assert_eq!(config.identity.token.issuer, "issuer");
        assert_eq!(config.identity.password.argon2.memory_kib, 4096);
        assert_eq!(config.identity.password.pepper.as_deref(), Some(&b"pepper"[..]));
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/identity"));
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let err = load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY_MINUTES", "soon")]).unwrap_err();
        assert!(err.to_string().contains("JWT_EXPIRY_MINUTES"));
    }
}
