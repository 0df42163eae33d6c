//! Command validation pipeline
//!
//! Commands are sent through a [`ValidationPipeline`] that wraps the real
//! [`CommandHandler`]. Every registered [`Validator`] for the command type runs
//! first; any violation short-circuits the handler and comes back as a
//! `Validation` failure built through [`FromErrors`].

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use crate::error::error_list::{ErrorList, FromErrors};

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl FieldError {
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Rule set for one command type.
pub trait Validator<C>: Send + Sync {
    /// Return every violated rule; empty means valid.
    fn validate(&self, command: &C) -> Vec<FieldError>;
}

/// Business operation executed for a command.
pub trait CommandHandler<C>: Send + Sync {
    type Output;

    fn handle(&self, command: C) -> impl Future<Output = Self::Output> + Send;
}

/// Decorator running validators before the wrapped handler.
pub struct ValidationPipeline<C, H> {
    validators: Vec<Arc<dyn Validator<C>>>,
    handler: H,
}

impl<C, H> ValidationPipeline<C, H>
where
    C: Send + 'static,
    H: CommandHandler<C>,
    H::Output: FromErrors,
{
    pub fn new(handler: H) -> Self {
        Self {
            validators: Vec::new(),
            handler,
        }
    }

    /// Register a validator for `C`.
    pub fn with_validator(mut self, validator: impl Validator<C> + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Validate `command` and, if it passes, run the handler.
    pub async fn execute(&self, command: C) -> H::Output {
        if self.validators.is_empty() {
            return self.handler.handle(command).await;
        }

        let violations = self
            .validators
            .iter()
            .flat_map(|validator| validator.validate(&command))
            .map(|field| (field.code, field.message));

        if let Some(errors) = ErrorList::validation(violations) {
            tracing::debug!(
                command = std::any::type_name::<C>(),
                violations = errors.len(),
                "Command rejected by validation"
            );
            return <H::Output as FromErrors>::from_errors(errors);
        }

        self.handler.handle(command).await
    }
}

impl<C, H> CommandHandler<C> for ValidationPipeline<C, H>
where
    C: Send + 'static,
    H: CommandHandler<C>,
    H::Output: FromErrors,
{
    type Output = H::Output;

    async fn handle(&self, command: C) -> Self::Output {
        self.execute(command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{app_error::AppError, error_list::AppResult, kind::ErrorKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Signup {
        name: String,
        email: String,
        password: String,
    }

    #[derive(Default)]
    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl CommandHandler<Signup> for CountingHandler {
        type Output = AppResult<String>;

        async fn handle(&self, command: Signup) -> Self::Output {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if command.name == "taken" {
                return Err(AppError::conflict("User.Taken", "taken").into());
            }
            Ok(command.name)
        }
    }

    struct FieldRules;

    impl Validator<Signup> for FieldRules {
        fn validate(&self, command: &Signup) -> Vec<FieldError> {
            let mut errors = Vec::new();
            if command.name.is_empty() {
                errors.push(FieldError::new("name", "name is required"));
            }
            if !command.email.contains('@') {
                errors.push(FieldError::new("email", "email is not valid"));
            }
            errors
        }
    }

    struct PasswordRule;

    impl Validator<Signup> for PasswordRule {
        fn validate(&self, command: &Signup) -> Vec<FieldError> {
            if command.password.len() < 8 {
                vec![FieldError::new("password", "password is too short")]
            } else {
                Vec::new()
            }
        }
    }

    fn signup(name: &str, email: &str, password: &str) -> Signup {
        Signup {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_collects_errors_from_every_validator() {
        let pipeline = ValidationPipeline::new(CountingHandler::default())
            .with_validator(FieldRules)
            .with_validator(PasswordRule);

        let errors = pipeline.execute(signup("", "nope", "short")).await.unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.kind() == ErrorKind::Validation));
        let codes: Vec<&str> = errors.iter().map(AppError::code).collect();
        assert_eq!(codes, vec!["name", "email", "password"]);
        assert_eq!(pipeline.handler().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_command_reaches_handler() {
        let pipeline = ValidationPipeline::new(CountingHandler::default())
            .with_validator(FieldRules)
            .with_validator(PasswordRule);

        let result = pipeline.execute(signup("ana", "ana@x.com", "Secure1!")).await;

        assert_eq!(result.unwrap(), "ana");
        assert_eq!(pipeline.handler().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_failure_is_returned_unchanged() {
        let pipeline = ValidationPipeline::new(CountingHandler::default()).with_validator(FieldRules);

        let errors = pipeline
            .execute(signup("taken", "a@b.com", "whatever"))
            .await
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_no_validators_is_pass_through() {
        let pipeline = ValidationPipeline::new(CountingHandler::default());

        let result = pipeline.execute(signup("", "", "")).await;

        assert_eq!(result.unwrap(), "");
        assert_eq!(pipeline.handler().calls.load(Ordering::SeqCst), 1);
    }
}
