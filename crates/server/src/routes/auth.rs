//! Registration and login handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use shoplite_core::{Role, UserId};

use crate::error::AppError;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Request to create an account.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Legacy field; an elevated role here is rejected unless the server
    /// opts in via configuration.
    pub role: Option<Role>,
}

/// Response from a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
    pub message: String,
}

/// Create a new account.
///
/// POST /register
///
/// # Errors
///
/// Returns 400 for invalid email or weak password, 403 for a denied
/// elevated role, and 409 when the email or name is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let auth = AuthService::new(
        state.pool(),
        state.tokens(),
        state.config().allow_registration_role,
    );

    let user = auth
        .register(&req.name, &req.email, &req.password, req.role)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            message: "user registered successfully".to_string(),
        }),
    ))
}

/// Request to log in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying a signed access token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Exchange credentials for an access token.
///
/// POST /login
///
/// # Errors
///
/// Returns 401 for a wrong email or password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth = AuthService::new(
        state.pool(),
        state.tokens(),
        state.config().allow_registration_role,
    );

    let access_token = auth.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
    }))
}
