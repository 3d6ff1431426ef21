//! `/api/userdata/registration/{registrationid}` — registrant profiles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use super::{error_response, forced_response};
use crate::state::{Behavior, StubState};

async fn get_by_registration(
    State(state): State<StubState>,
    Path(registration_id): Path<String>,
) -> Response {
    state.count_request();
    match state.behavior(&registration_id) {
        Some(Behavior::LegacyNotFound) | None => {}
        Some(behavior) => return forced_response(behavior),
    }
    match state.profile(&registration_id) {
        Some(profile) => Json(profile).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "User not found"),
    }
}

pub fn router() -> Router<StubState> {
    Router::new().route(
        "/api/userdata/registration/{registrationid}",
        get(get_by_registration),
    )
}
