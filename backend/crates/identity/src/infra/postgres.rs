//! PostgreSQL user store

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserStore;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{IdentityError, IdentityResult};

/// PostgreSQL-backed user store
///
/// `users.email` holds the normalized form under a unique index, so
/// uniqueness is enforced by the database rather than by the caller.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn exists_by_normalized_email(&self, email: &Email) -> IdentityResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_normalized_email(&self, email: &Email) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn insert(&self, user: &User) -> IdentityResult<()> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Err(IdentityError::EmailAlreadyExists);
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: Email::from_db(self.email),
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}
