//! Meal-Status Reducer.
//!
//! The service day is split into a lunch window and a dinner window at a
//! fixed local-time cutover.

use std::fmt;

use chrono::Timelike;
use serde::Serialize;

use crate::record::RegistrantRecord;
use crate::types::LocalTime;

/// First hour (local time, 24h clock) of the dinner window.
pub const MEAL_CUTOVER_HOUR: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    Lunch,
    Dinner,
}

impl MealKind {
    /// Meal window that contains `now`.
    pub fn at(now: LocalTime) -> Self {
        if now.hour() < MEAL_CUTOVER_HOUR {
            MealKind::Lunch
        } else {
            MealKind::Dinner
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealKind::Lunch => "Lunch",
            MealKind::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which meal is actionable right now and whether it is still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MealDecision {
    pub meal_kind: MealKind,
    pub is_available: bool,
}

/// Decide the actionable meal for `record` at `now`.
///
/// An absent eligibility flag counts as already consumed.
pub fn decide(record: &RegistrantRecord, now: LocalTime) -> MealDecision {
    let meal_kind = MealKind::at(now);
    MealDecision {
        meal_kind,
        is_available: record.flag(meal_kind).unwrap_or(false),
    }
}
