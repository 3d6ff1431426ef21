//! User-facing alerts for session results.
//!
//! Rendering is left to the presentation layer; this module only decides
//! what to say and which action to offer.

use serde::Serialize;

use crate::error::CoreError;
use crate::meal::MealKind;
use crate::record::RegistrantRecord;
use crate::session::SessionState;

/// Action offered alongside an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    /// Close the alert; the session keeps its state.
    Dismiss,
    /// Clear the entered ID and return the session to idle.
    TryAgain,
    /// Mark the named meal as availed.
    ConfirmMeal(MealKind),
}

impl AlertAction {
    pub fn label(self) -> &'static str {
        match self {
            AlertAction::Dismiss => "OK",
            AlertAction::TryAgain => "Try Again",
            AlertAction::ConfirmMeal(MealKind::Lunch) => "Avail Lunch",
            AlertAction::ConfirmMeal(MealKind::Dinner) => "Avail Dinner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub action: AlertAction,
}

impl Alert {
    fn new(title: impl Into<String>, message: impl Into<String>, action: AlertAction) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action,
        }
    }

    /// Alert describing `state`, or `None` for states with nothing to show.
    pub fn for_state(state: &SessionState) -> Option<Self> {
        let alert = match state {
            SessionState::Idle => return None,
            SessionState::Fetching => {
                Alert::new("Please wait", "Fetching user data...", AlertAction::Dismiss)
            }
            SessionState::Mutating { decision, .. } => Alert::new(
                "Please wait",
                format!("Marking {} as availed...", decision.meal_kind.label().to_lowercase()),
                AlertAction::Dismiss,
            ),
            SessionState::Found { record, decision } if decision.is_available => Alert::new(
                format!("{} Available", decision.meal_kind),
                describe(record),
                AlertAction::ConfirmMeal(decision.meal_kind),
            ),
            SessionState::Found { record, decision } => Alert::new(
                "Meal Status",
                format!(
                    "{}\n\n{} has already been availed.\n\n{}",
                    describe(record),
                    decision.meal_kind,
                    next_meal_hint(decision.meal_kind)
                ),
                AlertAction::Dismiss,
            ),
            SessionState::NotFound => not_found(),
            SessionState::InvalidInput { message } => invalid_input(message),
            SessionState::Updated { meal_kind, .. } => Alert::new(
                "Success",
                format!("{meal_kind} has been successfully availed.\n\nThank you for using our service!"),
                AlertAction::Dismiss,
            ),
            SessionState::TransportError {
                retained: Some(_), ..
            } => mutation_failed(),
            SessionState::TransportError { retained: None, .. } => connection_error(),
        };
        Some(alert)
    }

    /// Alert for an error that did not change the session, such as a
    /// refused confirmation or a rejected scan.
    pub fn for_error(err: &CoreError) -> Self {
        match err {
            CoreError::InvalidInput(message) => invalid_input(message),
            CoreError::NotFound { .. } => not_found(),
            CoreError::PreconditionFailed(message) => {
                Alert::new("Meal Status", message.clone(), AlertAction::Dismiss)
            }
            CoreError::Transport(_) => connection_error(),
        }
    }
}

/// What to tell the user about the other meal once `kind` is consumed.
pub fn next_meal_hint(kind: MealKind) -> &'static str {
    match kind {
        MealKind::Lunch => "Dinner will be available after 4 PM.",
        MealKind::Dinner => "Lunch will be available tomorrow.",
    }
}

fn describe(record: &RegistrantRecord) -> String {
    format!(
        "Registration ID: {}\nName: {}\nType: {}",
        record.registration_id,
        record.display_name.as_deref().unwrap_or("-"),
        record.display_type.as_deref().unwrap_or("-"),
    )
}

fn not_found() -> Alert {
    Alert::new(
        "User Not Found",
        "The registration ID you entered does not exist in our system.",
        AlertAction::TryAgain,
    )
}

fn invalid_input(message: &str) -> Alert {
    Alert::new("Invalid Input", message, AlertAction::TryAgain)
}

fn connection_error() -> Alert {
    Alert::new(
        "Connection Error",
        "Unable to connect to the server. Please check your internet connection.",
        AlertAction::TryAgain,
    )
}

fn mutation_failed() -> Alert {
    Alert::new("Error", "Failed to update meal status", AlertAction::TryAgain)
}
