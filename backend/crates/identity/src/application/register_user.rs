//! Register User Use Case
//!
//! Creates a new account and issues its first bearer token.

use std::fmt;
use std::sync::Arc;

use kernel::error::error_list::{AppResult, ErrorList};
use kernel::validation::CommandHandler;

use crate::domain::entity::user::User;
use crate::domain::repository::UserStore;
use crate::domain::services::{Clock, PasswordHasher, TokenIssuer};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{IdentityError, IdentityResult};

/// Register input
#[derive(Clone)]
pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Register output
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub token: String,
}

/// Register use case
pub struct RegisterUserUseCase<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    store: Arc<S>,
    hasher: Arc<H>,
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl<S, H> RegisterUserUseCase<S, H>
where
    S: UserStore + Send + Sync,
    H: PasswordHasher + Send + Sync,
{
    pub fn new(
        store: Arc<S>,
        hasher: Arc<H>,
        issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
            clock,
        }
    }

    pub async fn execute(&self, input: RegisterUserCommand) -> IdentityResult<RegisteredUser> {
        let email = Email::normalize(&input.email);

        if self.store.exists_by_normalized_email(&email).await? {
            return Err(IdentityError::EmailAlreadyExists);
        }

        let password_hash = self.hasher.hash(&input.password).await?;

        let user = User::new(input.name, email, password_hash, self.clock.now());

        // A concurrent registration may have won since the existence check;
        // the store rejects it atomically.
        self.store.insert(&user).await?;

        let token = self.issuer.issue(&user.id, &user.email)?;

        tracing::info!(
            user_id = %user.id,
            email_domain = %user.email.domain(),
            "User registered"
        );

        Ok(RegisteredUser {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }
}

impl<S, H> CommandHandler<RegisterUserCommand> for RegisterUserUseCase<S, H>
where
    S: UserStore + Send + Sync,
    H: PasswordHasher + Send + Sync,
{
    type Output = AppResult<RegisteredUser>;

    async fn handle(&self, command: RegisterUserCommand) -> Self::Output {
        self.execute(command).await.map_err(ErrorList::from)
    }
}
