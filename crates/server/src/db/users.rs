//! User repository for database operations.

use sqlx::PgPool;

use shoplite_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::User;

const USER_COLUMNS: &str = "id, name, email, role, bio, created_at, updated_at";

/// Row shape for credential checks: the user plus their password hash.
#[derive(sqlx::FromRow)]
struct AuthRow {
    id: UserId,
    name: String,
    email: Email,
    role: Role,
    bio: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    password_hash: String,
}

impl AuthRow {
    fn split(self) -> (User, String) {
        (
            User {
                id: self.id,
                name: self.name,
                email: self.email,
                role: self.role,
                bio: self.bio,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            self.password_hash,
        )
    }
}

/// Fields for inserting a new user.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a Email,
    pub password_hash: &'a str,
    pub role: Role,
}

/// Partial profile update. `None` fields keep their stored value.
///
/// `bio` is nullable in storage, so it carries one more level: the outer
/// `None` keeps the stored value, `Some(None)` clears it.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub bio: Option<Option<String>>,
}

impl ProfileChanges {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.bio.is_none()
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or name already
    /// exists, `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_user: &NewUser<'_>) -> Result<User, RepositoryError> {
        let query = format!(
            "INSERT INTO shop.user (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(new_user.name)
            .bind(new_user.email)
            .bind(new_user.password_hash)
            .bind(new_user.role)
            .fetch_one(self.pool)
            .await
            .map_err(map_unique_violation)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM shop.user WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no user has that email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_auth_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let query = format!(
            "SELECT {USER_COLUMNS}, password_hash FROM shop.user WHERE email = $1"
        );

        let row = sqlx::query_as::<_, AuthRow>(&query)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(AuthRow::split))
    }

    /// Merge partial profile fields into the stored user.
    ///
    /// Identity and role are not reachable through this path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist and
    /// `RepositoryError::Conflict` if a new name or email collides.
    pub async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<User, RepositoryError> {
        let query = format!(
            "UPDATE shop.user SET
                 name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 bio = CASE WHEN $5 THEN $4::text ELSE bio END,
                 updated_at = now()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.email.as_ref())
            .bind(changes.bio.as_ref().and_then(|bio| bio.as_deref()))
            .bind(changes.bio.is_some())
            .fetch_optional(self.pool)
            .await
            .map_err(map_unique_violation)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Set a user's role by email. Used by the CLI promotion path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has that email.
    pub async fn set_role_by_email(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE shop.user SET role = $2, updated_at = now() WHERE email = $1")
            .bind(email)
            .bind(role)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Translate unique-constraint violations into `Conflict` with a field hint.
fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let field = if db_err.constraint().is_some_and(|c| c.contains("email")) {
            "email"
        } else {
            "name"
        };
        return RepositoryError::Conflict(format!("{field} already exists"));
    }
    RepositoryError::Database(e)
}
