//! Authentication extractor.
//!
//! Resolves the `Authorization: Bearer <token>` header into the calling
//! user's identity. Token signature and expiry are enforced here; role
//! checks happen in the services that need them.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use shoplite_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, as carried by a verified access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: UserId,
}

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("user {}", user.id)
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected bearer token".to_string()))?;

        let id = state.tokens().verify(token)?;

        Ok(Self(AuthUser { id }))
    }
}
