//! Classification of schedule-service responses.
//!
//! The service answers "not found" both as HTTP 404 and as a 200 body
//! carrying `status: 300`. Both are folded into [`LookupOutcome::NotFound`]
//! here so nothing downstream inspects raw status codes.

use serde_json::Value;

use crate::error::CoreError;
use crate::record::{RecordKey, RegistrantRecord, ScheduleEntry};

/// Legacy status value meaning "no data", seen both as an HTTP status and
/// inside 200 bodies.
pub const LEGACY_NOT_FOUND_STATUS: u16 = 300;

/// Message used when a 400 response does not carry an `error` field.
pub const DEFAULT_BAD_REQUEST_MESSAGE: &str = "Please enter a valid registration ID";

/// Exhaustive result of a lookup (or of a mutation response).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(RegistrantRecord),
    NotFound,
    InvalidInput(String),
    Transport(String),
}

impl LookupOutcome {
    /// Fold the outcome into the error taxonomy. `key` names the record in
    /// a [`CoreError::NotFound`].
    pub fn into_result(self, key: &RecordKey) -> Result<RegistrantRecord, CoreError> {
        match self {
            LookupOutcome::Found(record) => Ok(record),
            LookupOutcome::NotFound => Err(CoreError::NotFound {
                registration_id: key.registration_id.to_string(),
                date: Some(key.date),
            }),
            LookupOutcome::InvalidInput(msg) => Err(CoreError::InvalidInput(msg)),
            LookupOutcome::Transport(detail) => Err(CoreError::Transport(detail)),
        }
    }
}

impl From<CoreError> for LookupOutcome {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => LookupOutcome::NotFound,
            CoreError::InvalidInput(msg) => LookupOutcome::InvalidInput(msg),
            CoreError::PreconditionFailed(msg) | CoreError::Transport(msg) => {
                LookupOutcome::Transport(msg)
            }
        }
    }
}

/// Classify a response received for the record identified by `key`.
pub fn classify_response(status: u16, body: &[u8], key: &RecordKey) -> LookupOutcome {
    match status {
        500.. => LookupOutcome::Transport(format!("server error ({status})")),
        404 | LEGACY_NOT_FOUND_STATUS => LookupOutcome::NotFound,
        400 => LookupOutcome::InvalidInput(
            error_message(body).unwrap_or_else(|| DEFAULT_BAD_REQUEST_MESSAGE.to_string()),
        ),
        200..=299 => classify_success_body(body, key),
        _ => LookupOutcome::Transport(format!("unexpected status {status}")),
    }
}

fn classify_success_body(body: &[u8], key: &RecordKey) -> LookupOutcome {
    if body.iter().all(u8::is_ascii_whitespace) {
        return LookupOutcome::Transport("No data received from server".to_string());
    }
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => return LookupOutcome::Transport(format!("malformed response body: {e}")),
    };
    if value.is_null() {
        return LookupOutcome::Transport("No data received from server".to_string());
    }
    if !value.is_object() {
        return LookupOutcome::Transport("malformed response body: expected an object".to_string());
    }
    if value.get("status").and_then(Value::as_u64) == Some(LEGACY_NOT_FOUND_STATUS as u64) {
        return LookupOutcome::NotFound;
    }
    match serde_json::from_value::<ScheduleEntry>(value) {
        Ok(entry) => LookupOutcome::Found(RegistrantRecord::from_entry(entry, key.clone())),
        Err(e) => LookupOutcome::Transport(format!("malformed response body: {e}")),
    }
}

/// `error` field of a JSON error body, if any.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::registration::RegistrationId;
    use crate::types::ServiceDate;

    fn key() -> RecordKey {
        RecordKey::new(
            RegistrationId::parse("12345").unwrap(),
            ServiceDate::from_ymd_opt(2026, 10, 18).unwrap(),
        )
    }

    // -----------------------------------------------------------------------
    // Found
    // -----------------------------------------------------------------------

    #[test]
    fn ok_body_is_found() {
        let outcome = classify_response(200, br#"{"lunch":true,"dinner":false}"#, &key());
        assert_matches!(outcome, LookupOutcome::Found(record) => {
            assert_eq!(record.lunch_eligible, Some(true));
            assert_eq!(record.dinner_eligible, Some(false));
            assert_eq!(record.key(), key());
        });
    }

    // -----------------------------------------------------------------------
    // Not found, in both encodings
    // -----------------------------------------------------------------------

    #[test]
    fn http_404_is_not_found() {
        assert_eq!(
            classify_response(404, br#"{"error":"User not found"}"#, &key()),
            LookupOutcome::NotFound
        );
    }

    #[test]
    fn sentinel_body_is_not_found() {
        assert_eq!(
            classify_response(200, br#"{"status":300,"message":"No data"}"#, &key()),
            LookupOutcome::NotFound
        );
    }

    #[test]
    fn http_300_is_not_found() {
        assert_eq!(classify_response(300, b"", &key()), LookupOutcome::NotFound);
    }

    #[test]
    fn other_status_values_in_body_are_ignored() {
        assert_matches!(
            classify_response(200, br#"{"status":200,"lunch":true}"#, &key()),
            LookupOutcome::Found(_)
        );
    }

    // -----------------------------------------------------------------------
    // Invalid input
    // -----------------------------------------------------------------------

    #[test]
    fn bad_request_uses_error_field() {
        assert_eq!(
            classify_response(400, br#"{"error":"Invalid date"}"#, &key()),
            LookupOutcome::InvalidInput("Invalid date".to_string())
        );
    }

    #[test]
    fn bad_request_without_error_field_uses_default_message() {
        assert_eq!(
            classify_response(400, b"<html>", &key()),
            LookupOutcome::InvalidInput(DEFAULT_BAD_REQUEST_MESSAGE.to_string())
        );
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    #[test]
    fn server_errors_are_transport() {
        for status in [500, 502, 503] {
            assert_matches!(
                classify_response(status, b"", &key()),
                LookupOutcome::Transport(_)
            );
        }
    }

    #[test]
    fn empty_or_null_body_is_transport() {
        assert_matches!(classify_response(200, b"", &key()), LookupOutcome::Transport(_));
        assert_matches!(classify_response(200, b"null", &key()), LookupOutcome::Transport(_));
    }

    #[test]
    fn non_object_body_is_transport() {
        assert_matches!(
            classify_response(200, b"[1,2]", &key()),
            LookupOutcome::Transport(_)
        );
    }

    #[test]
    fn unexpected_client_status_is_transport() {
        assert_matches!(classify_response(409, b"", &key()), LookupOutcome::Transport(_));
    }

    #[test]
    fn not_found_folds_into_keyed_error() {
        assert_matches!(
            LookupOutcome::NotFound.into_result(&key()),
            Err(CoreError::NotFound { registration_id, .. }) if registration_id == "12345"
        );
    }
}
