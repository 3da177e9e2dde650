use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{catalog::ProductCatalog, stylist::HybridStylist},
};

pub mod products;
pub mod quiz;
pub mod recommendations;

/// Shared application state
///
/// Everything in here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub stylist: HybridStylist,
    /// `None` when no catalog is configured
    pub catalog: Option<Arc<dyn ProductCatalog>>,
}

impl AppState {
    pub fn new(stylist: HybridStylist, catalog: Option<Arc<dyn ProductCatalog>>) -> Self {
        Self { stylist, catalog }
    }

    /// Rules-only state without a catalog
    pub fn rules_only() -> Self {
        Self::new(HybridStylist::default(), None)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/quiz/submit", post(quiz::submit))
        .route("/products", get(products::list))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let mut features = vec!["rules"];
    if let Some(backend) = state.stylist.gateway().backend_name() {
        features.push(backend);
    }
    if state.catalog.is_some() {
        features.push("products");
    }

    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "features": features })),
    )
}
