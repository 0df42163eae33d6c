//! Authenticate User Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::fmt;
use std::sync::Arc;

use kernel::error::error_list::{AppResult, ErrorList};
use kernel::validation::CommandHandler;

use crate::domain::repository::UserStore;
use crate::domain::services::{PasswordHasher, TokenIssuer};
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

/// Authenticate input
#[derive(Clone)]
pub struct AuthenticateUserCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AuthenticateUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticateUserCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authenticate output
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: String,
}

/// Authenticate use case
pub struct AuthenticateUserUseCase<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    store: Arc<S>,
    hasher: Arc<H>,
    issuer: Arc<dyn TokenIssuer>,
}

impl<S, H> AuthenticateUserUseCase<S, H>
where
    S: UserStore + Send + Sync,
    H: PasswordHasher + Send + Sync,
{
    pub fn new(store: Arc<S>, hasher: Arc<H>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    pub async fn execute(&self, input: AuthenticateUserCommand) -> IdentityResult<AuthenticatedUser> {
        let email = Email::normalize(&input.email);

        let user = self
            .store
            .find_by_normalized_email(&email)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        if !self.hasher.verify(&input.password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "Password verification failed");
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.issuer.issue(&user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(AuthenticatedUser { token })
    }
}

impl<S, H> CommandHandler<AuthenticateUserCommand> for AuthenticateUserUseCase<S, H>
where
    S: UserStore + Send + Sync,
    H: PasswordHasher + Send + Sync,
{
    type Output = AppResult<AuthenticatedUser>;

    async fn handle(&self, command: AuthenticateUserCommand) -> Self::Output {
        self.execute(command).await.map_err(ErrorList::from)
    }
}
