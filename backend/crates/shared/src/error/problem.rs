//! Problem responses - boundary translation of [`ErrorList`] into HTTP
//!
//! Every failure leaving the API goes through [`Problem::from_errors`]:
//! - all errors `Validation` → 400 with a field list
//! - otherwise the first error's kind selects status and a single
//!   `{title, detail, code}` body
//! - `Failure` → 500 with a generic detail; the original error is logged and
//!   never echoed to the client

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::error_list::ErrorList;
use super::kind::ErrorKind;

/// Title used for the 400 field-list shape.
pub const VALIDATION_TITLE: &str = "Validation failed";
/// Detail used for the 400 field-list shape.
pub const VALIDATION_DETAIL: &str = "One or more validation errors occurred";
/// Title used for 500 responses.
pub const FAILURE_TITLE: &str = "An error occurred while processing your request";
/// Detail used for 500 responses.
pub const FAILURE_DETAIL: &str = "An unexpected error occurred. Please try again later.";

/// One entry of the 400 field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProblem {
    pub code: String,
    pub message: String,
}

/// JSON problem envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    pub status: u16,
    pub title: String,
    pub detail: String,
    pub instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldProblem>>,
}

/// HTTP status plus problem body, ready to be returned from a handler.
#[derive(Debug, Clone)]
pub struct Problem {
    status: StatusCode,
    details: ProblemDetails,
}

impl Problem {
    /// Translate a failure into its transport shape.
    ///
    /// `instance` is the request path the failure belongs to.
    pub fn from_errors(errors: &ErrorList, instance: impl Into<String>) -> Self {
        let instance = instance.into();

        if errors.is_all_validation() {
            let fields = errors
                .iter()
                .map(|e| FieldProblem {
                    code: e.code().to_string(),
                    message: e.description().to_string(),
                })
                .collect();
            return Self::build(
                ErrorKind::Validation,
                ProblemDetails {
                    status: ErrorKind::Validation.status_code(),
                    title: VALIDATION_TITLE.to_string(),
                    detail: VALIDATION_DETAIL.to_string(),
                    instance,
                    code: None,
                    errors: Some(fields),
                },
            );
        }

        let first = errors.first();
        match first.kind() {
            ErrorKind::Failure => {
                tracing::error!(
                    code = %first.code(),
                    description = %first.description(),
                    source = ?std::error::Error::source(first),
                    instance = %instance,
                    "Unhandled failure reached the API boundary"
                );
                Self::failure(instance)
            }
            kind => {
                tracing::debug!(code = %first.code(), status = kind.status_code(), "Request failed");
                Self::build(
                    kind,
                    ProblemDetails {
                        status: kind.status_code(),
                        title: kind.as_str().to_string(),
                        detail: first.description().to_string(),
                        instance,
                        code: Some(first.code().to_string()),
                        errors: None,
                    },
                )
            }
        }
    }

    /// Generic 500 that leaks nothing about the cause.
    pub fn failure(instance: impl Into<String>) -> Self {
        Self::build(
            ErrorKind::Failure,
            ProblemDetails {
                status: ErrorKind::Failure.status_code(),
                title: FAILURE_TITLE.to_string(),
                detail: FAILURE_DETAIL.to_string(),
                instance: instance.into(),
                code: None,
                errors: None,
            },
        )
    }

    fn build(kind: ErrorKind, details: ProblemDetails) -> Self {
        let status =
            StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, details }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn details(&self) -> &ProblemDetails {
        &self.details
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.details)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}
