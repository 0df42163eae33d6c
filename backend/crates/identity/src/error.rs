//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error` model. Handlers return [`IdentityResult`]; the boundary
//! converts into an [`ErrorList`] and then into a problem response.

use kernel::error::{app_error::AppError, error_list::ErrorList, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Another account already uses the normalized email
    #[error("Email already registered")]
    EmailAlreadyExists,

    /// No account for the normalized email
    #[error("User not found")]
    UserNotFound,

    /// Password did not verify
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed or the worker was lost
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Token signing failed
    #[error("Token error: {0}")]
    Token(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::EmailAlreadyExists => ErrorKind::Conflict,
            IdentityError::UserNotFound => ErrorKind::NotFound,
            // Reported as a field-level problem (400), not 401
            IdentityError::InvalidCredentials => ErrorKind::Validation,
            IdentityError::Database(_)
            | IdentityError::Hashing(_)
            | IdentityError::Token(_)
            | IdentityError::Internal(_) => ErrorKind::Failure,
        }
    }

    /// Stable error code exposed to clients
    pub fn code(&self) -> &'static str {
        match self {
            IdentityError::EmailAlreadyExists => "User.EmailAlreadyExists",
            IdentityError::UserNotFound => "User.NotFound",
            IdentityError::InvalidCredentials => "User.InvalidCredentials",
            IdentityError::Database(_) => "Database.Error",
            IdentityError::Hashing(_) => "Password.HashingFailed",
            IdentityError::Token(_) => "Token.SigningFailed",
            IdentityError::Internal(_) => "Identity.Internal",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::EmailAlreadyExists => {
                AppError::conflict(self.code(), "email already registered")
            }
            IdentityError::UserNotFound => AppError::not_found(self.code(), "user not found"),
            IdentityError::InvalidCredentials => {
                AppError::validation(self.code(), "invalid email or password")
            }
            IdentityError::Database(_)
            | IdentityError::Hashing(_)
            | IdentityError::Token(_)
            | IdentityError::Internal(_) => AppError::new(self.kind(), self.code(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Hashing(msg) => {
                tracing::error!(message = %msg, "Password hashing error");
            }
            IdentityError::Token(msg) => {
                tracing::error!(message = %msg, "Token signing error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid authentication attempt");
            }
            IdentityError::EmailAlreadyExists => {
                tracing::warn!("Registration attempt with an existing email");
            }
            IdentityError::UserNotFound => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl From<IdentityError> for ErrorList {
    fn from(err: IdentityError) -> Self {
        err.log();
        match err {
            IdentityError::Database(e) => ErrorList::single(AppError::from(e)),
            other => ErrorList::single(other.to_app_error()),
        }
    }
}

impl From<platform::password::PasswordHashError> for IdentityError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        IdentityError::Hashing(err.to_string())
    }
}

impl From<platform::token::TokenError> for IdentityError {
    fn from(err: platform::token::TokenError) -> Self {
        IdentityError::Token(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_codes() {
        let conflict = IdentityError::EmailAlreadyExists.to_app_error();
        assert_eq!(conflict.kind(), ErrorKind::Conflict);
        assert_eq!(conflict.code(), "User.EmailAlreadyExists");
        assert_eq!(conflict.description(), "email already registered");

        let missing = IdentityError::UserNotFound.to_app_error();
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(missing.code(), "User.NotFound");

        let credentials = IdentityError::InvalidCredentials.to_app_error();
        assert_eq!(credentials.kind(), ErrorKind::Validation);
        assert_eq!(credentials.code(), "User.InvalidCredentials");
        assert_eq!(credentials.description(), "invalid email or password");
    }

    #[test]
    fn test_infrastructure_errors_are_failures() {
        assert_eq!(IdentityError::Hashing("x".into()).kind(), ErrorKind::Failure);
        assert_eq!(IdentityError::Token("x".into()).kind(), ErrorKind::Failure);
        assert_eq!(IdentityError::Internal("x".into()).kind(), ErrorKind::Failure);
    }

    #[test]
    fn test_into_error_list_is_single() {
        let errors: ErrorList = IdentityError::EmailAlreadyExists.into();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code(), "User.EmailAlreadyExists");
    }

    #[test]
    fn test_database_errors_map_through_kernel() {
        let errors: ErrorList = IdentityError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(errors.first().kind(), ErrorKind::NotFound);
    }
}
