//! Command Validators
//!
//! Field rules checked by the validation pipeline before a handler runs.
//! Every rule is evaluated on its own and reports one error when violated,
//! so an empty field can report both "required" and its format rule.
//! Error codes are the JSON field names.

use kernel::validation::{FieldError, Validator};
use regex::Regex;

use crate::application::authenticate_user::AuthenticateUserCommand;
use crate::application::config::ValidationConfig;
use crate::application::register_user::RegisterUserCommand;
use crate::error::{IdentityError, IdentityResult};

/// Minimum password length (characters)
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Symbols accepted (and one required) in a password
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

// ============================================================================
// Register
// ============================================================================

/// Rules for [`RegisterUserCommand`]
#[derive(Debug, Clone)]
pub struct RegisterUserValidator {
    email_pattern: Regex,
}

impl RegisterUserValidator {
    pub fn new(config: &ValidationConfig) -> IdentityResult<Self> {
        let email_pattern = Regex::new(&config.email_pattern)
            .map_err(|e| IdentityError::Internal(format!("Invalid email pattern: {}", e)))?;
        Ok(Self { email_pattern })
    }
}

impl Validator<RegisterUserCommand> for RegisterUserValidator {
    fn validate(&self, command: &RegisterUserCommand) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if command.name.trim().is_empty() {
            errors.push(FieldError::new("name", "name is required"));
        }

        if command.email.trim().is_empty() {
            errors.push(FieldError::new("email", "email is required"));
        }
        if !self.email_pattern.is_match(&command.email) {
            errors.push(FieldError::new("email", "email is not a valid address"));
        }

        if command.password.trim().is_empty() {
            errors.push(FieldError::new("password", "password is required"));
        }
        if let Some(error) = password_policy(&command.password) {
            errors.push(error);
        }

        errors
    }
}

/// Password strength rule; the first broken check names the problem
fn password_policy(password: &str) -> Option<FieldError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Some(FieldError::new(
            "password",
            "password must be at least 8 characters",
        ));
    }

    let is_symbol = |c: char| PASSWORD_SYMBOLS.contains(c);

    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_symbol(c))
    {
        return Some(FieldError::new(
            "password",
            "password may only contain letters, digits and @$!%*?&",
        ));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(is_symbol);

    if !(has_lower && has_upper && has_digit && has_symbol) {
        return Some(FieldError::new(
            "password",
            "password must contain an uppercase letter, a lowercase letter, a digit and one of @$!%*?&",
        ));
    }

    None
}

// ============================================================================
// Authenticate
// ============================================================================

/// Rules for [`AuthenticateUserCommand`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticateUserValidator;

impl Validator<AuthenticateUserCommand> for AuthenticateUserValidator {
    fn validate(&self, command: &AuthenticateUserCommand) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if command.email.trim().is_empty() {
            errors.push(FieldError::new("email", "email is required"));
        }
        if !looks_like_address(&command.email) {
            errors.push(FieldError::new("email", "email is not a valid address"));
        }

        if command.password.trim().is_empty() {
            errors.push(FieldError::new("password", "password is required"));
        }

        errors
    }
}

/// Exactly one `@`, neither first nor last
fn looks_like_address(email: &str) -> bool {
    match email.find('@') {
        Some(at) => at > 0 && at < email.len() - 1 && email.rfind('@') == Some(at),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn validator() -> RegisterUserValidator {
        RegisterUserValidator::new(&ValidationConfig::default()).unwrap()
    }

    fn codes(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(FieldError::code).collect()
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(validator().validate(&register("Ana", "Ana@X.com", "Secure1!")).is_empty());
    }

    #[test]
    fn test_every_field_reports() {
        let errors = validator().validate(&register(" ", "not-an-email", "short"));
        assert_eq!(codes(&errors), vec!["name", "email", "password"]);
    }

    #[test]
    fn test_one_error_per_violated_rule() {
        let errors = validator().validate(&register("Ana", "", ""));
        assert_eq!(codes(&errors), vec!["email", "email", "password", "password"]);
        assert_eq!(errors[0].message(), "email is required");
        assert_eq!(errors[1].message(), "email is not a valid address");
        assert_eq!(errors[2].message(), "password is required");
        assert_eq!(
            errors[3].message(),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let errors = validator().validate(&register("  ", "   ", "        "));
        let messages: Vec<&str> = errors.iter().map(FieldError::message).collect();
        assert!(messages.contains(&"name is required"));
        assert!(messages.contains(&"email is required"));
        assert!(messages.contains(&"password is required"));
    }

    #[test]
    fn test_password_rules() {
        let v = validator();
        let message = |p: &str| {
            v.validate(&register("Ana", "ana@x.com", p))
                .first()
                .map(|e| e.message().to_string())
        };

        assert_eq!(message("Secure1!"), None);
        assert_eq!(
            message("Sec1!"),
            Some("password must be at least 8 characters".to_string())
        );
        assert!(message("secure12!").unwrap().contains("uppercase"));
        assert!(message("SECURE12!").unwrap().contains("lowercase"));
        assert!(message("Securepw!").unwrap().contains("digit"));
        assert!(message("Secure123").unwrap().contains("@$!%*?&"));
        assert!(message("Secure1!#").unwrap().contains("may only contain"));
        assert!(message("Sécure1!x").unwrap().contains("may only contain"));
    }

    #[test]
    fn test_email_pattern() {
        let v = validator();
        let email_ok = |e: &str| v.validate(&register("Ana", e, "Secure1!")).is_empty();

        assert!(email_ok("ana@x.com"));
        assert!(email_ok("first.last+tag@sub.example.org"));
        assert!(!email_ok("ana@x"));
        assert!(!email_ok("ana@x.c"));
        assert!(!email_ok("@x.com"));
        assert!(!email_ok("ana x@x.com"));
    }

    #[test]
    fn test_custom_email_pattern() {
        let config = ValidationConfig {
            email_pattern: r"^[a-z]+@corp\.example$".to_string(),
        };
        let v = RegisterUserValidator::new(&config).unwrap();
        assert!(v.validate(&register("Ana", "ana@corp.example", "Secure1!")).is_empty());
        assert_eq!(
            codes(&v.validate(&register("Ana", "ana@x.com", "Secure1!"))),
            vec!["email"]
        );
    }

    #[test]
    fn test_invalid_email_pattern_is_rejected() {
        let config = ValidationConfig {
            email_pattern: "([".to_string(),
        };
        assert!(RegisterUserValidator::new(&config).is_err());
    }

    #[test]
    fn test_authenticate_rules() {
        let validate = |email: &str, password: &str| {
            AuthenticateUserValidator.validate(&AuthenticateUserCommand {
                email: email.to_string(),
                password: password.to_string(),
            })
        };

        assert!(validate("ana@x.com", "wrong").is_empty());
        assert_eq!(codes(&validate("", "")), vec!["email", "email", "password"]);
        assert_eq!(codes(&validate("ana", "pw")), vec!["email"]);
        assert_eq!(codes(&validate("ana@", "pw")), vec!["email"]);
        assert_eq!(codes(&validate("@x.com", "pw")), vec!["email"]);
        assert_eq!(codes(&validate("a@b@c", "pw")), vec!["email"]);
    }

    #[test]
    fn test_authenticate_rejects_blank_password() {
        let errors = AuthenticateUserValidator.validate(&AuthenticateUserCommand {
            email: "ana@x.com".to_string(),
            password: "   ".to_string(),
        });
        assert_eq!(codes(&errors), vec!["password"]);
        assert_eq!(errors[0].message(), "password is required");
    }
}
