pub mod prompt;
pub mod suggest;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use taxvoice_common::TaxVoiceError;

use crate::AppState;

/// Map a request failure onto the JSON error shape.
///
/// Validation problems are the caller's fault and echo their message; anything
/// else is logged and reported generically.
pub fn error_response(err: TaxVoiceError) -> Response {
    match err {
        TaxVoiceError::Validation(message) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response(),
        other => {
            warn!(error = %other, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal error" })),
            )
                .into_response()
        }
    }
}

/// Unpack a JSON body, turning an unreadable one into the same 400 shape.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(value)| value)
        .map_err(|rejection| error_response(TaxVoiceError::Validation(rejection.body_text())))
}

pub async fn api_spending(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({ "categories": state.spending.breakdown() }))
}
