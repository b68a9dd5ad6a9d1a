//! Interaction log handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use shoplite_core::{InteractionId, InteractionKind, ProductId};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::HistoryEntry;
use crate::services::interaction::InteractionService;
use crate::state::AppState;

/// Request to record an interaction event.
#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub product_id: ProductId,
    /// Older clients send this field as `interaction_type`.
    #[serde(alias = "interaction_type")]
    pub kind: InteractionKind,
}

/// Response from a recorded interaction.
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub interaction_id: InteractionId,
    pub message: String,
}

/// Record a view, like, or purchase event against a product.
///
/// POST /interactions
///
/// The product reference is not validated against the catalog.
pub async fn record(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<RecordRequest>,
) -> Result<(StatusCode, Json<RecordResponse>), AppError> {
    let interactions = InteractionService::new(state.pool());

    let interaction = interactions.record(user.id, req.product_id, req.kind).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse {
            interaction_id: interaction.id,
            message: "interaction recorded".to_string(),
        }),
    ))
}

/// The current user's interaction history, newest first.
///
/// GET /history
///
/// # Errors
///
/// Returns 404 when the user has no interactions whose products still exist.
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let interactions = InteractionService::new(state.pool());

    let entries = interactions.history(user.id).await?;

    Ok(Json(entries))
}
