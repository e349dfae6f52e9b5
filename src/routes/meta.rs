use crate::routes::{AppState, store_error_response};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use styla_core::api::{MetaUpdateRequest, OkResponse};

/// Parsed `@OBSThemeMeta` contents of a stored theme.
pub async fn get_meta(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.store.meta(&name) {
        Ok(meta) => Json(meta).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// Replace the `@OBSThemeMeta` block of a stored theme in place.
pub async fn update_meta(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<MetaUpdateRequest>,
) -> Response {
    match state.store.update_meta(&name, &request.meta) {
        Ok(()) => Json(OkResponse::new("Theme metadata updated.")).into_response(),
        Err(e) => store_error_response(e),
    }
}
