use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::ProductPage,
    routes::AppState,
    services::catalog::validate_listing,
};

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    30
}

/// Handler for browsing one catalog category
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ProductPage>> {
    let catalog = state
        .catalog
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Product catalog is not configured".to_string()))?;

    validate_listing(&query.category, query.size)?;

    let page = catalog
        .list_products(&query.category, query.page, query.size)
        .await?;

    Ok(Json(page))
}
