use mealcheck_client::{ClientConfig, ScheduleApi};
use mealcheck_core::types::ServiceDate;
use mealcheck_stub::StubState;

pub const DATE: &str = "2026-10-18";

pub fn today() -> ServiceDate {
    ServiceDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Serve `state` on an ephemeral port and return a client pointed at it.
pub async fn client_for(state: StubState) -> ScheduleApi {
    let (addr, _handle) = mealcheck_stub::spawn(state).await.expect("stub should bind");
    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        request_timeout_secs: Some(5),
    };
    ScheduleApi::new(&config).expect("client should build")
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> ScheduleApi {
    let config = ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: Some(5),
    };
    ScheduleApi::new(&config).expect("client should build")
}
