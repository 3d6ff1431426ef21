pub mod health;
pub mod schedule;
pub mod userdata;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::state::Behavior;

/// JSON error body in the shape the real service uses.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Response forced by a configured [`Behavior`].
pub(crate) fn forced_response(behavior: Behavior) -> Response {
    match behavior {
        Behavior::LegacyNotFound => {
            Json(json!({ "status": 300, "message": "No data found" })).into_response()
        }
        Behavior::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, &message),
        Behavior::ServerError => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
