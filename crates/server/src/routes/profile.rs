//! Profile handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Get the current user's profile.
///
/// GET /profile
///
/// # Errors
///
/// Returns 404 if the token's user no longer exists.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<User>, AppError> {
    let auth = AuthService::new(
        state.pool(),
        state.tokens(),
        state.config().allow_registration_role,
    );

    let profile = auth.get_profile(user.id).await.map_err(profile_error)?;

    Ok(Json(profile))
}

/// Partial profile update. Absent fields keep their stored values.
/// Identity and role are never touched through this path.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// An absent `bio` keeps the stored value; an explicit `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
}

// Plain `Option<Option<T>>` folds JSON `null` into the outer `None`, which
// would make clearing the bio indistinguishable from leaving it alone.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Merge partial fields into the current user's profile.
///
/// PUT /profile
///
/// # Errors
///
/// Returns 400 for a malformed email and 409 on a unique-field collision.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let auth = AuthService::new(
        state.pool(),
        state.tokens(),
        state.config().allow_registration_role,
    );

    let profile = auth
        .update_profile(user.id, req.name, req.email, req.bio)
        .await
        .map_err(profile_error)?;

    Ok(Json(profile))
}

/// On the profile endpoints a token whose user no longer exists is a 404,
/// not the credential-style 401 the login paths use.
fn profile_error(err: AuthError) -> AppError {
    match err {
        AuthError::UserNotFound => AppError::NotFound("user no longer exists".to_string()),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateProfileRequest;

    #[test]
    fn absent_bio_deserializes_to_keep() {
        let req: UpdateProfileRequest = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Ana"));
        assert_eq!(req.bio, None);
    }

    #[test]
    fn null_bio_deserializes_to_clear() {
        let req: UpdateProfileRequest = serde_json::from_str(r#"{"bio":null}"#).unwrap();
        assert_eq!(req.bio, Some(None));
    }

    #[test]
    fn string_bio_deserializes_to_replace() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"bio":"collects vinyl"}"#).unwrap();
        assert_eq!(req.bio, Some(Some("collects vinyl".to_string())));
    }
}
