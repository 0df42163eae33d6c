//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::IdentityResult;

/// User store
///
/// Every lookup takes the normalized email. `insert` must enforce email
/// uniqueness atomically and report a duplicate as
/// [`IdentityError::EmailAlreadyExists`](crate::error::IdentityError::EmailAlreadyExists).
#[trait_variant::make(UserStore: Send)]
pub trait LocalUserStore {
    /// Check if a user with this email exists
    async fn exists_by_normalized_email(&self, email: &Email) -> IdentityResult<bool>;

    /// Find user by email
    async fn find_by_normalized_email(&self, email: &Email) -> IdentityResult<Option<User>>;

    /// Insert a new user, failing on a duplicate email
    async fn insert(&self, user: &User) -> IdentityResult<()>;
}
