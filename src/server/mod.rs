//! HTTP surface over the calculators.

pub mod api;
pub mod error;

use crate::core::RateCache;
use crate::core::config::ServerConfig;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

pub struct AppState {
    pub rates: RateCache,
}

impl AppState {
    pub fn new(rates: RateCache) -> Arc<Self> {
        Arc::new(Self { rates })
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.cors_allow_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let origins = config
        .cors_allow_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();
    cors.allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/analizar", post(api::analyze_budget))
        .route("/proyectar-meta", post(api::project_goal))
        .route("/recomendaciones", get(api::recommendations))
        .route("/convertir-moneda", post(api::convert_currency))
        .route("/monedas", get(api::list_currencies));

    Router::new()
        .route("/healthz", get(api::healthz))
        .nest("/api", api)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// Serves the API until Ctrl-C.
pub async fn serve(state: Arc<AppState>, config: &ServerConfig) -> Result<()> {
    let router = app_router(state, config);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;
    info!("Server stopped");
    Ok(())
}
