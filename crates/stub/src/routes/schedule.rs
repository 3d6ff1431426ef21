//! `/api/foodtrucks/schedule` — meal schedule lookup and update.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use super::{error_response, forced_response};
use crate::state::StubState;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    registrationid: Option<String>,
    date: Option<String>,
}

async fn get_schedule(State(state): State<StubState>, Query(query): Query<ScheduleQuery>) -> Response {
    state.count_request();
    let (Some(id), Some(date)) = (query.registrationid, query.date) else {
        return error_response(StatusCode::BAD_REQUEST, "registrationid and date are required");
    };
    tracing::debug!(registration_id = %id, %date, "Schedule lookup");

    if let Some(behavior) = state.behavior(&id) {
        return forced_response(behavior);
    }
    match state.schedule(&id, &date) {
        Some(body) => Json(body).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Schedule not found"),
    }
}

async fn patch_schedule(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.count_request();
    state.record_patch(body.clone());

    let id = body.get("registrationid").and_then(Value::as_str);
    let date = body.get("date").and_then(Value::as_str);
    let (Some(id), Some(date)) = (id, date) else {
        return error_response(StatusCode::BAD_REQUEST, "registrationid and date are required");
    };
    tracing::debug!(registration_id = %id, %date, "Schedule update");

    if let Some(behavior) = state.behavior(id) {
        return forced_response(behavior);
    }
    match state.apply_patch(id, date, &body) {
        Some(updated) => Json(updated).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Schedule not found"),
    }
}

pub fn router() -> Router<StubState> {
    Router::new()
        .route(
            "/api/foodtrucks/schedule",
            get(get_schedule).patch(patch_schedule),
        )
        .route(
            "/api/foodtrucks/schedule/",
            get(get_schedule).patch(patch_schedule),
        )
}
