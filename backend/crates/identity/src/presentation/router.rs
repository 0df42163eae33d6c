//! Identity Router

use std::sync::Arc;

use axum::{Router, routing::post};

use crate::application::config::IdentityConfig;
use crate::domain::repository::UserStore;
use crate::domain::services::{Clock, PasswordHasher, SystemClock};
use crate::error::IdentityResult;
use crate::infra::credentials::{Argon2PasswordHasher, JwtTokenIssuer};
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the Identity router with Argon2 hashing and JWT issuance over `store`
///
/// Fails when the token secret is missing, the Argon2 settings are rejected
/// or the email pattern does not compile.
pub fn identity_router<S>(store: S, config: &IdentityConfig) -> IdentityResult<Router>
where
    S: UserStore + Send + Sync + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let hasher = Argon2PasswordHasher::new(&config.password)?;
    let issuer = JwtTokenIssuer::new(&config.token, clock.clone())?;

    let state = IdentityAppState::new(
        Arc::new(store),
        Arc::new(hasher),
        Arc::new(issuer),
        clock,
        &config.validation,
    )?;

    Ok(identity_router_with_state(state))
}

/// Create the Identity router for an already wired state
pub fn identity_router_with_state<S, H>(state: IdentityAppState<S, H>) -> Router
where
    S: UserStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<S, H>))
        .route("/authenticate", post(handlers::authenticate::<S, H>))
        .with_state(state)
}
