use crate::routes::AppState;
use axum::Json;
use axum::extract::State;
use styla_core::api::ValidateResponse;

/// Validate every stored theme, with cross-file duplicate-id detection.
pub async fn get_validate(State(state): State<AppState>) -> Json<ValidateResponse> {
    Json(state.store.validate_all())
}
