//! Registrant schedule records.
//!
//! [`ScheduleEntry`] is the wire shape returned by the schedule service;
//! [`RegistrantRecord`] is what the rest of the crate works with, keyed by
//! `(registration_id, date)`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::meal::MealKind;
use crate::registration::RegistrationId;
use crate::types::{ServiceDate, DATE_FORMAT};

/// Identity of a record: one registrant on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub registration_id: RegistrationId,
    pub date: ServiceDate,
}

impl RecordKey {
    pub fn new(registration_id: RegistrationId, date: ServiceDate) -> Self {
        Self {
            registration_id,
            date,
        }
    }
}

/// Schedule body as sent by the service. Every field is optional and
/// tolerant of wrong JSON types, which read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleEntry {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub lunch: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub dinner: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub food_truck_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub food_truck_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<ServiceDate>,
}

/// One registrant's meal eligibility for one date.
///
/// An eligibility flag of `Some(true)` means the meal has not been consumed
/// yet. `None` means the service omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrantRecord {
    pub registration_id: RegistrationId,
    pub date: ServiceDate,
    pub lunch_eligible: Option<bool>,
    pub dinner_eligible: Option<bool>,
    pub display_name: Option<String>,
    pub display_type: Option<String>,
}

impl RegistrantRecord {
    /// Build a record from a service body.
    ///
    /// The registration ID always comes from `key`, since the service does
    /// not echo it reliably. The date comes from the body when present.
    pub fn from_entry(entry: ScheduleEntry, key: RecordKey) -> Self {
        Self {
            registration_id: key.registration_id,
            date: entry.date.unwrap_or(key.date),
            lunch_eligible: entry.lunch,
            dinner_eligible: entry.dinner,
            display_name: entry.food_truck_name,
            display_type: entry.food_truck_type,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.registration_id.clone(), self.date)
    }

    /// Raw eligibility flag for `kind`, as sent by the service.
    pub fn flag(&self, kind: MealKind) -> Option<bool> {
        match kind {
            MealKind::Lunch => self.lunch_eligible,
            MealKind::Dinner => self.dinner_eligible,
        }
    }

    /// Whether this record may still be used on `today`.
    pub fn is_current(&self, today: ServiceDate) -> bool {
        self.date == today
    }
}

// ---------------------------------------------------------------------------
// Lenient field readers
// ---------------------------------------------------------------------------

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ServiceDate>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| ServiceDate::parse_from_str(s, DATE_FORMAT).ok()))
}
