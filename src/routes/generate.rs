use crate::routes::AppState;
use axum::Json;
use axum::extract::State;
use styla_core::api::GenerateResponse;

/// Regenerate the builtin themes into the store.
pub async fn post_generate(State(state): State<AppState>) -> Json<GenerateResponse> {
    let results = state.store.generate_builtins();
    Json(GenerateResponse {
        results,
        themes: state.store.list(),
    })
}
