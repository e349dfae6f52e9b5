pub mod convert;
pub mod generate;
pub mod health;
pub mod meta;
pub mod themes;
pub mod validate;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;
use std::sync::Arc;
use std::time::Instant;
use styla_store::{StoreError, ThemeStore};

#[derive(RustEmbed)]
#[folder = "web"]
struct WebAssets;

/// Shared state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ThemeStore>,
    pub start_time: Instant,
}

/// Build the complete axum router.
pub fn build_router(store: Arc<ThemeStore>, start_time: Instant, max_body_bytes: usize) -> Router {
    let state = AppState { store, start_time };

    Router::new()
        .route("/health", axum::routing::get(health::get_health))
        .route("/api/themes", axum::routing::get(themes::list_themes))
        .route("/api/themes/{name}", axum::routing::get(themes::download_theme))
        .route("/api/themes/{name}", axum::routing::delete(themes::delete_theme))
        .route(
            "/api/themes/{name}/duplicate",
            axum::routing::post(themes::duplicate_theme),
        )
        .route("/api/themes/{name}/meta", axum::routing::get(meta::get_meta))
        .route("/api/themes/{name}/meta", axum::routing::post(meta::update_meta))
        .route("/api/generate", axum::routing::post(generate::post_generate))
        .route("/api/validate", axum::routing::get(validate::get_validate))
        .route("/api/convert", axum::routing::post(convert::post_convert))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .fallback(serve_web_asset)
        .with_state(state)
}

/// JSON error body with the status the legacy API used for this failure.
pub fn store_error_response(err: StoreError) -> Response {
    let status = match &err {
        StoreError::InvalidName(_) | StoreError::AlreadyExists | StoreError::EmptyMeta => {
            StatusCode::BAD_REQUEST
        }
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::NoMetaBlock | StoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        log::error!("Store error: {}", err);
    }
    (
        status,
        axum::Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// Serve the embedded index page.
async fn serve_web_asset(uri: axum::http::Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let file = if path.is_empty() { "index.html" } else { path };

    match WebAssets::get(file) {
        Some(content) => {
            let mime = match file.rsplit('.').next() {
                Some("html") => "text/html; charset=utf-8",
                Some("css") => "text/css; charset=utf-8",
                Some("js") => "application/javascript; charset=utf-8",
                _ => "application/octet-stream",
            };
            ([(axum::http::header::CONTENT_TYPE, mime)], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}
