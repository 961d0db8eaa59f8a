//! Handlers for the web-app shell: HTML entry page, service worker,
//! manifest, and the remaining static assets. These are opaque files served
//! as-is from the asset loader.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;

/// Serve the HTML entry page.
pub async fn handle_index(State(assets): State<Arc<AssetLoader>>) -> Result<Response, ApiError> {
    serve(&assets, "index.html", "text/html; charset=utf-8")
}

/// Serve the service worker script.
///
/// Served from the site root (not under /static/) so its scope covers the
/// whole app.
pub async fn handle_service_worker(
    State(assets): State<Arc<AssetLoader>>,
) -> Result<Response, ApiError> {
    serve(&assets, "sw.js", "application/javascript")
}

/// Serve the web-app manifest.
pub async fn handle_manifest(
    State(assets): State<Arc<AssetLoader>>,
) -> Result<Response, ApiError> {
    serve(&assets, "manifest.json", "application/manifest+json")
}

/// Serve any other shell asset by path.
pub async fn handle_static_asset(
    State(assets): State<Arc<AssetLoader>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    // Asset names are flat relative paths; anything trying to walk the
    // filesystem is a miss.
    if path.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        return Err(ApiError::NotFound);
    }

    serve(&assets, &path, AssetLoader::content_type(&path))
}

fn serve(
    assets: &AssetLoader,
    relative_path: &str,
    content_type: &'static str,
) -> Result<Response, ApiError> {
    let data = assets
        .read_static(relative_path)
        .map_err(|_| ApiError::NotFound)?;

    Ok((
        [(header::CONTENT_TYPE, content_type)],
        data.into_owned(),
    )
        .into_response())
}
