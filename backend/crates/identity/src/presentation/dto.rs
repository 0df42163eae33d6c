//! API DTOs (Data Transfer Objects)
//!
//! Missing request fields deserialize as empty strings so that the
//! validators, not the JSON extractor, report them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    AuthenticateUserCommand, AuthenticatedUser, RegisterUserCommand, RegisteredUser,
};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for RegisterUserCommand {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl From<RegisteredUser> for RegisterResponse {
    fn from(user: RegisteredUser) -> Self {
        Self {
            id: user.id.into_uuid(),
            name: user.name,
            email: user.email.into_db(),
            token: user.token,
        }
    }
}

// ============================================================================
// Authenticate
// ============================================================================

/// Authenticate request
#[derive(Clone, Deserialize)]
pub struct AuthenticateRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<AuthenticateRequest> for AuthenticateUserCommand {
    fn from(req: AuthenticateRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Authenticate response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub token: String,
}

impl From<AuthenticatedUser> for AuthenticateResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self { token: user.token }
    }
}
