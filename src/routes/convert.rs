use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use styla_core::api::{ConvertRequest, ConvertResponse};
use styla_ovt::convert_json;

/// Convert a JSON theme document into OVT text.
pub async fn post_convert(Json(request): Json<ConvertRequest>) -> Response {
    match convert_json(&request.json) {
        Ok(ovt) => Json(ConvertResponse { ovt }).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
