//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from infrastructure error types to [`AppError`].

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => {
                AppError::not_found("Database.RecordNotFound", "record not found").with_source(err)
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                AppError::failure("Database.Unavailable", "database unavailable").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL specific error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    // Class 23: Integrity Constraint Violation
                    Some("23505") => AppError::conflict("Database.DuplicateKey", "duplicate key value"),
                    Some("23503") => {
                        AppError::conflict("Database.ForeignKey", "foreign key violation")
                    }
                    _ => AppError::failure("Database.Error", "database error"),
                };
                app_err.with_source(err)
            }
            _ => AppError::failure("Database.Error", "database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::validation("Request.Body", rejection.body_text())
    }
}
