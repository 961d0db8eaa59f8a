//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::ScanPipeline;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assets: Arc<AssetLoader>,
    pub pipeline: Arc<ScanPipeline>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let pipeline = Arc::new(ScanPipeline::new());

    Ok(AppState {
        config,
        assets: asset_loader,
        pipeline,
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        // Processing endpoint
        .route("/process-image", post(handle_process_image))
        // Web-app shell
        .route("/", get(handle_index))
        .route("/sw.js", get(handle_service_worker))
        .route("/manifest.json", get(handle_manifest))
        .route("/static/*path", get(handle_static_asset))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state, upload limit and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_process_image(
    axum::extract::State(state): axum::extract::State<AppState>,
    multipart: axum::extract::Multipart,
) -> Result<axum::response::Response, ApiError> {
    api::handle_process_image(
        axum::extract::State(state.pipeline),
        axum::extract::State(state.config),
        multipart,
    )
    .await
}

async fn handle_index(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_index(axum::extract::State(state.assets)).await
}

async fn handle_service_worker(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_service_worker(axum::extract::State(state.assets)).await
}

async fn handle_manifest(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_manifest(axum::extract::State(state.assets)).await
}

async fn handle_static_asset(
    axum::extract::State(state): axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_static_asset(axum::extract::State(state.assets), path).await
}
