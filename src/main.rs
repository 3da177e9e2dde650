use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use dressly_api::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{catalog, HybridStylist},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dressly_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let stylist = HybridStylist::from_config(&config)?;
    tracing::info!(
        backend = stylist.gateway().backend_name().unwrap_or("none"),
        "Stylist ready"
    );

    // Redis is only contacted once a catalog request needs it
    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;
    let catalog = catalog::from_config(&config, cache)?;

    let state = Arc::new(AppState::new(stylist, catalog));
    let app = create_router(state).layer(cors_layer(&config)?);

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, "Dressly API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache_writer.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// CORS for the configured origins; "*" allows any origin
fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origins = config.cors_origins();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
