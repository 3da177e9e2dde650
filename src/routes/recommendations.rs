use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{
        ResponseSource, StylistResponse, UserPreferences, UserProfile, WardrobeItem,
        DEFAULT_MAX_OUTFITS,
    },
    routes::AppState,
};

/// Largest outfit count a caller may ask for
pub const MAX_OUTFITS_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    #[serde(default)]
    pub wardrobe: Vec<WardrobeItem>,
    #[serde(default)]
    pub max_outfits: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub source: ResponseSource,
    pub recommendation: StylistResponse,
}

/// Resolves the requested outfit count, rejecting values outside 1..=10
pub fn outfit_count(requested: Option<usize>) -> AppResult<usize> {
    match requested.unwrap_or(DEFAULT_MAX_OUTFITS) {
        n @ 1..=MAX_OUTFITS_LIMIT => Ok(n),
        n => Err(AppError::InvalidInput(format!(
            "max_outfits must be between 1 and {}, got {}",
            MAX_OUTFITS_LIMIT, n
        ))),
    }
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let max_outfits = outfit_count(request.max_outfits)?;

    let recommendation = state
        .stylist
        .generate_async(
            &request.profile,
            request.preferences.as_ref(),
            &request.wardrobe,
            max_outfits,
        )
        .await;

    tracing::info!(
        source = %recommendation.source(),
        outfits = recommendation.outfit_count(),
        wardrobe = request.wardrobe.len(),
        "Recommendation generated"
    );

    Ok(Json(RecommendationResponse {
        source: recommendation.source(),
        recommendation,
    }))
}
