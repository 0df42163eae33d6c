//! HTTP Handlers
//!
//! Handlers only translate between HTTP and commands. Every command goes
//! through its validation pipeline; failures leave as problem responses.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, State};
use axum::http::Uri;
use kernel::error::{app_error::AppError, error_list::ErrorList, problem::Problem};
use kernel::validation::ValidationPipeline;

use crate::application::config::ValidationConfig;
use crate::application::{
    AuthenticateUserCommand, AuthenticateUserUseCase, AuthenticateUserValidator,
    RegisterUserCommand, RegisterUserUseCase, RegisterUserValidator,
};
use crate::domain::repository::UserStore;
use crate::domain::services::{Clock, PasswordHasher, TokenIssuer};
use crate::error::IdentityResult;
use crate::presentation::dto::{
    AuthenticateRequest, AuthenticateResponse, RegisterRequest, RegisterResponse,
};

pub type RegisterPipeline<S, H> = ValidationPipeline<RegisterUserCommand, RegisterUserUseCase<S, H>>;

pub type AuthenticatePipeline<S, H> =
    ValidationPipeline<AuthenticateUserCommand, AuthenticateUserUseCase<S, H>>;

/// Shared state for identity handlers
pub struct IdentityAppState<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    pub register: Arc<RegisterPipeline<S, H>>,
    pub authenticate: Arc<AuthenticatePipeline<S, H>>,
}

impl<S, H> IdentityAppState<S, H>
where
    S: UserStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    /// Wire both use cases behind their validators
    pub fn new(
        store: Arc<S>,
        hasher: Arc<H>,
        issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
        validation: &ValidationConfig,
    ) -> IdentityResult<Self> {
        let register = ValidationPipeline::new(RegisterUserUseCase::new(
            store.clone(),
            hasher.clone(),
            issuer.clone(),
            clock,
        ))
        .with_validator(RegisterUserValidator::new(validation)?);

        let authenticate =
            ValidationPipeline::new(AuthenticateUserUseCase::new(store, hasher, issuer))
                .with_validator(AuthenticateUserValidator);

        Ok(Self {
            register: Arc::new(register),
            authenticate: Arc::new(authenticate),
        })
    }
}

impl<S, H> Clone for IdentityAppState<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    fn clone(&self) -> Self {
        Self {
            register: self.register.clone(),
            authenticate: self.authenticate.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<S, H>(
    State(state): State<IdentityAppState<S, H>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, Problem>
where
    S: UserStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| malformed_body(&uri, rejection))?;

    let registered = state
        .register
        .execute(req.into())
        .await
        .map_err(|errors| Problem::from_errors(&errors, uri.path()))?;

    Ok(Json(RegisterResponse::from(registered)))
}

// ============================================================================
// Authenticate
// ============================================================================

/// POST /authenticate
pub async fn authenticate<S, H>(
    State(state): State<IdentityAppState<S, H>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<Json<AuthenticateResponse>, Problem>
where
    S: UserStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| malformed_body(&uri, rejection))?;

    let authenticated = state
        .authenticate
        .execute(req.into())
        .await
        .map_err(|errors| Problem::from_errors(&errors, uri.path()))?;

    Ok(Json(AuthenticateResponse::from(authenticated)))
}

fn malformed_body(uri: &Uri, rejection: JsonRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    Problem::from_errors(&ErrorList::from(AppError::from(rejection)), uri.path())
}
