//! Integration tests for the meal-avail mutation against the stub service.

mod common;

use assert_matches::assert_matches;
use common::{client_for, today, unreachable_client, DATE};
use mealcheck_core::error::CoreError;
use mealcheck_core::lookup::LookupOutcome;
use mealcheck_core::meal::{decide, MealDecision, MealKind};
use mealcheck_core::record::RegistrantRecord;
use mealcheck_core::types::LocalTime;
use mealcheck_stub::StubState;
use serde_json::json;

fn ten_am() -> LocalTime {
    today().and_hms_opt(10, 0, 0).unwrap()
}

async fn fetch(api: &mealcheck_client::ScheduleApi, id: &str) -> RegistrantRecord {
    match api.lookup(id, today()).await {
        LookupOutcome::Found(record) => record,
        other => panic!("expected Found, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: body shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn marking_lunch_keeps_dinner_flag_in_body() {
    let state = StubState::new();
    state.insert_schedule("12345", DATE, json!({"lunch": true, "dinner": true}));
    let api = client_for(state.clone()).await;

    let record = fetch(&api, "12345").await;
    let decision = decide(&record, ten_am());
    let updated = api.mark_consumed(&record, &decision).await.unwrap();

    assert_eq!(
        state.patches(),
        vec![json!({"registrationid": "12345", "date": DATE, "lunch": false, "dinner": true})]
    );
    assert_eq!(updated.lunch_eligible, Some(false));
    assert_eq!(updated.dinner_eligible, Some(true));
}

#[tokio::test]
async fn server_representation_replaces_local_copy() {
    let state = StubState::new();
    state.insert_schedule(
        "12345",
        DATE,
        json!({"lunch": true, "dinner": true, "food_truck_name": "Tacos Uno"}),
    );
    let api = client_for(state.clone()).await;
    let record = fetch(&api, "12345").await;

    // Another device renames the truck between lookup and confirmation.
    state.insert_schedule(
        "12345",
        DATE,
        json!({"lunch": true, "dinner": true, "food_truck_name": "Tacos Dos"}),
    );
    let updated = api
        .mark_consumed(&record, &decide(&record, ten_am()))
        .await
        .unwrap();

    assert_eq!(updated.display_name.as_deref(), Some("Tacos Dos"));
}

// ---------------------------------------------------------------------------
// Test: idempotence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repeating_the_same_update_is_a_no_op() {
    let state = StubState::new();
    state.insert_schedule("12345", DATE, json!({"lunch": true, "dinner": true}));
    let api = client_for(state.clone()).await;

    let record = fetch(&api, "12345").await;
    let decision = decide(&record, ten_am());
    let first = api.mark_consumed(&record, &decision).await.unwrap();
    let second = api.mark_consumed(&record, &decision).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(state.patches()[0], state.patches()[1]);
}

#[tokio::test]
async fn consumed_meal_is_refused_without_network_call() {
    let state = StubState::new();
    state.insert_schedule("12345", DATE, json!({"lunch": false, "dinner": true}));
    let api = client_for(state.clone()).await;

    let record = fetch(&api, "12345").await;
    let before = state.request_count();
    let decision = decide(&record, ten_am());

    assert_matches!(
        api.mark_consumed(&record, &decision).await,
        Err(CoreError::PreconditionFailed(_))
    );
    assert_eq!(state.request_count(), before);
}

// ---------------------------------------------------------------------------
// Test: failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_host_is_transport() {
    let state = StubState::new();
    state.insert_schedule("12345", DATE, json!({"lunch": true, "dinner": true}));
    let record = fetch(&client_for(state).await, "12345").await;

    let decision = MealDecision {
        meal_kind: MealKind::Lunch,
        is_available: true,
    };
    assert_matches!(
        unreachable_client().mark_consumed(&record, &decision).await,
        Err(CoreError::Transport(_))
    );
}

#[tokio::test]
async fn update_of_deleted_schedule_is_not_found() {
    let state = StubState::new();
    state.insert_schedule("12345", DATE, json!({"lunch": true, "dinner": true}));
    let api = client_for(state.clone()).await;
    let record = fetch(&api, "12345").await;

    state.set_behavior("12345", mealcheck_stub::Behavior::LegacyNotFound);

    assert_matches!(
        api.mark_consumed(&record, &decide(&record, ten_am())).await,
        Err(CoreError::NotFound { .. })
    );
}
