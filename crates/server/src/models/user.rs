//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shoplite_core::{Email, Role, UserId};

/// A registered user.
///
/// The password hash lives only in the `shop.user` row and the repository's
/// private auth query; it is never part of this type, so profile reads can
/// serialize it directly.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name (unique).
    pub name: String,
    /// Email address (unique).
    pub email: Email,
    /// Role (`user` or `admin`).
    pub role: Role,
    /// Optional free-form profile text.
    pub bio: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
