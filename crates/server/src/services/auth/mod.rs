//! Account service.
//!
//! Registration, login, and profile reads/updates over argon2-hashed
//! passwords and JWT access tokens.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use shoplite_core::{Email, Role, UserId};

use crate::db::RepositoryError;
use crate::db::users::{NewUser, ProfileChanges, UserRepository};
use crate::models::User;
use crate::services::token::TokenService;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Account service.
///
/// Handles registration, login, and profile management.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
    /// Legacy flag: honor a caller-supplied elevated role at registration.
    allow_registration_role: bool,
}

impl<'a> AuthService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        tokens: &'a TokenService,
        allow_registration_role: bool,
    ) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
            allow_registration_role,
        }
    }

    /// Register a new user.
    ///
    /// The stored role is `user` unless the caller supplies one. A supplied
    /// elevated role is rejected unless the legacy registration-role flag is
    /// set; promotion otherwise happens through the admin CLI.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::WeakPassword` if the password doesn't meet requirements,
    /// `AuthError::RoleNotPermitted` for a denied elevated role, and
    /// `AuthError::UserAlreadyExists` if the email or name is taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        requested_role: Option<Role>,
    ) -> Result<User, AuthError> {
        // Validate email
        let email = Email::parse(email)?;

        // Validate password
        validate_password(password)?;

        // Role policy
        let role = requested_role.unwrap_or_default();
        if role.is_admin() && !self.allow_registration_role {
            return Err(AuthError::RoleNotPermitted);
        }

        // Hash password
        let password_hash = hash_password(password)?;

        // Create user
        let user = self
            .users
            .create(&NewUser {
                name,
                email: &email,
                password_hash: &password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(field) => AuthError::UserAlreadyExists(field),
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password, returning a signed access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        // Validate email format
        let email = Email::parse(email)?;

        // Get user with password hash
        let (user, password_hash) = self
            .users
            .get_auth_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        verify_password(password, &password_hash)?;

        // Issue token bound to the user identity
        let token = self.tokens.issue(user.id)?;

        Ok(token)
    }

    /// Get a user's profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the identity no longer resolves.
    pub async fn get_profile(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Merge partial fields into a user's profile.
    ///
    /// Identity and role can never be changed through this path.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist,
    /// `AuthError::InvalidEmail` for a malformed replacement email, and
    /// `AuthError::UserAlreadyExists` on a unique-field collision.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        name: Option<String>,
        email: Option<String>,
        bio: Option<Option<String>>,
    ) -> Result<User, AuthError> {
        let email = email.as_deref().map(Email::parse).transpose()?;

        let changes = ProfileChanges { name, email, bio };
        if changes.is_empty() {
            return self.get_profile(user_id).await;
        }

        self.users
            .update_profile(user_id, &changes)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(field) => AuthError::UserAlreadyExists(field),
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
