//! Recommendation handler.

use axum::{Json, extract::State};
use serde::Serialize;

use shoplite_core::UserId;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::services::recommend::RecommendService;
use crate::state::AppState;

/// Recommendation response.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub user_id: UserId,
    pub recommendations: Vec<Product>,
}

/// Products popular among other users, most popular first.
///
/// GET /recommendations
///
/// May return fewer than five products, or none, when the interaction
/// log is thin.
pub async fn recommend(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<RecommendResponse>, AppError> {
    let recommender = RecommendService::new(state.pool());

    let recommendations = recommender.recommend(user.id).await?;

    Ok(Json(RecommendResponse {
        user_id: user.id,
        recommendations,
    }))
}
