//! Shared in-memory state of the stub service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

/// Forced response for a registration ID, overriding stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// `200 {"status": 300}` — the legacy "no data" body.
    LegacyNotFound,
    /// `400 {"error": ...}`
    BadRequest(String),
    /// `500`
    ServerError,
}

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by `(registrationid, date)`.
    schedules: HashMap<(String, String), Map<String, Value>>,
    profiles: HashMap<String, Value>,
    behaviors: HashMap<String, Behavior>,
    patches: Vec<Value>,
}

/// Cheaply cloneable handle; all clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct StubState {
    inner: Arc<Mutex<Inner>>,
    requests: Arc<AtomicUsize>,
}

impl StubState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A few registrants for `date`, for local development.
    pub fn demo(date: &str) -> Self {
        let state = Self::new();
        state.insert_schedule(
            "12345",
            date,
            serde_json::json!({
                "lunch": true,
                "dinner": true,
                "food_truck_name": "Tacos Uno",
                "food_truck_type": "Mexican",
            }),
        );
        state.insert_schedule(
            "23456",
            date,
            serde_json::json!({
                "lunch": false,
                "dinner": true,
                "food_truck_name": "Curry Corner",
                "food_truck_type": "Indian",
            }),
        );
        state.insert_profile(
            "12345",
            serde_json::json!({
                "registrationid": "12345",
                "type": "volunteer",
                "name": "Sam Rivera",
                "created_at": "2026-01-05T09:30:00Z",
            }),
        );
        state.set_behavior("300", Behavior::LegacyNotFound);
        state
    }

    /// Store a schedule body. Non-object bodies are stored as empty objects.
    pub fn insert_schedule(&self, registration_id: &str, date: &str, body: Value) {
        let body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.lock()
            .schedules
            .insert((registration_id.to_string(), date.to_string()), body);
    }

    pub fn insert_profile(&self, registration_id: &str, profile: Value) {
        self.lock()
            .profiles
            .insert(registration_id.to_string(), profile);
    }

    pub fn set_behavior(&self, registration_id: &str, behavior: Behavior) {
        self.lock()
            .behaviors
            .insert(registration_id.to_string(), behavior);
    }

    pub fn behavior(&self, registration_id: &str) -> Option<Behavior> {
        self.lock().behaviors.get(registration_id).cloned()
    }

    /// Service representation of a stored schedule.
    pub fn schedule(&self, registration_id: &str, date: &str) -> Option<Value> {
        self.lock()
            .schedules
            .get(&(registration_id.to_string(), date.to_string()))
            .map(|body| represent(registration_id, date, body))
    }

    /// Apply the meal flags present in `patch` and return the updated
    /// representation, or `None` for an unknown registrant.
    pub fn apply_patch(&self, registration_id: &str, date: &str, patch: &Value) -> Option<Value> {
        let mut inner = self.lock();
        let body = inner
            .schedules
            .get_mut(&(registration_id.to_string(), date.to_string()))?;
        for meal in ["lunch", "dinner"] {
            if let Some(flag) = patch.get(meal).and_then(Value::as_bool) {
                body.insert(meal.to_string(), Value::Bool(flag));
            }
        }
        Some(represent(registration_id, date, body))
    }

    pub fn profile(&self, registration_id: &str) -> Option<Value> {
        self.lock().profiles.get(registration_id).cloned()
    }

    pub fn record_patch(&self, body: Value) {
        self.lock().patches.push(body);
    }

    /// PATCH bodies received so far, oldest first.
    pub fn patches(&self) -> Vec<Value> {
        self.lock().patches.clone()
    }

    pub fn count_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of schedule and profile requests served.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn represent(registration_id: &str, date: &str, body: &Map<String, Value>) -> Value {
    let mut out = body.clone();
    out.entry("registrationid")
        .or_insert_with(|| Value::String(registration_id.into()));
    out.entry("date").or_insert_with(|| Value::String(date.into()));
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn patch_only_touches_present_flags() {
        let state = StubState::new();
        state.insert_schedule("1", "2026-10-18", json!({"lunch": true, "dinner": true}));

        let updated = state
            .apply_patch("1", "2026-10-18", &json!({"lunch": false}))
            .unwrap();

        assert_eq!(updated["lunch"], false);
        assert_eq!(updated["dinner"], true);
        assert_eq!(updated["registrationid"], "1");
        assert_eq!(updated["date"], "2026-10-18");
    }

    #[test]
    fn patch_of_unknown_registrant_is_none() {
        let state = StubState::new();
        assert!(state.apply_patch("9", "2026-10-18", &json!({"lunch": false})).is_none());
    }

    #[test]
    fn clones_share_data() {
        let state = StubState::new();
        let clone = state.clone();
        clone.count_request();
        clone.set_behavior("5", Behavior::ServerError);
        assert_eq!(state.request_count(), 1);
        assert_eq!(state.behavior("5"), Some(Behavior::ServerError));
    }
}
