//! Meal-eligibility domain for the food-distribution check-in flow.
//!
//! Pure logic only: registration IDs and scan payloads, endpoint URLs,
//! response classification, the lunch/dinner reducer, the mutation body,
//! the session state machine and the alerts shown for each outcome. The
//! HTTP side lives in `mealcheck-client`.

pub mod alert;
pub mod endpoint;
pub mod error;
pub mod lookup;
pub mod meal;
pub mod profile;
pub mod record;
pub mod registration;
pub mod session;
pub mod types;
pub mod update;
