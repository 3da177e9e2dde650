use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{QuizInput, ResponseSource, StylistResponse, DEFAULT_MAX_OUTFITS},
    routes::AppState,
    services::catalog,
};

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub status: &'static str,
    pub input: QuizInput,
    pub source: ResponseSource,
    pub recommendation: StylistResponse,
    /// Catalog listings; empty when no catalog is configured or it failed
    pub products: Vec<Value>,
    pub generated_at: DateTime<Utc>,
}

/// Handler for quiz submissions
///
/// Validates the answers, asks the stylist for outfits and attaches catalog
/// products for the requested occasions.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(input): Json<QuizInput>,
) -> AppResult<Json<QuizResponse>> {
    input.validate()?;

    let profile = input.profile();
    let preferences = input.preferences();

    let recommendation = state
        .stylist
        .generate_async(&profile, Some(&preferences), &[], DEFAULT_MAX_OUTFITS)
        .await;

    let products = match &state.catalog {
        Some(source) => catalog::recommended_products(source.as_ref(), &input.occasion).await,
        None => Vec::new(),
    };

    tracing::info!(
        occasion = ?preferences.occasion,
        source = %recommendation.source(),
        outfits = recommendation.outfit_count(),
        products = products.len(),
        "Quiz processed"
    );

    Ok(Json(QuizResponse {
        status: "success",
        input,
        source: recommendation.source(),
        recommendation,
        products,
        generated_at: Utc::now(),
    }))
}
