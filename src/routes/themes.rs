use crate::routes::{AppState, store_error_response};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use styla_core::api::{DuplicateRequest, OkResponse, ThemeListResponse};

pub async fn list_themes(State(state): State<AppState>) -> Json<ThemeListResponse> {
    Json(ThemeListResponse {
        themes: state.store.list(),
    })
}

/// Download a stored theme file as an attachment.
pub async fn download_theme(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.store.read(&name) {
        Ok(content) => {
            // Quotes and control characters are legal in stored names but
            // not inside a quoted header value.
            let header_name: String = name
                .chars()
                .filter(|c| !c.is_control() && *c != '"')
                .collect();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", header_name),
                    ),
                ],
                content,
            )
                .into_response()
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn delete_theme(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.store.delete(&name) {
        Ok(()) => Json(OkResponse::new(format!("Theme '{}' deleted.", name))).into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn duplicate_theme(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<DuplicateRequest>,
) -> Response {
    match state.store.duplicate(&name, &request.new_name) {
        Ok(target) => Json(OkResponse::new(format!(
            "Theme '{}' duplicated to '{}'.",
            name, target
        )))
        .into_response(),
        Err(e) => store_error_response(e),
    }
}
