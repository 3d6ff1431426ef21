//! Request body of the meal-avail mutation.

use serde::Serialize;

use crate::error::CoreError;
use crate::meal::{MealDecision, MealKind};
use crate::record::{RecordKey, RegistrantRecord};
use crate::registration::RegistrationId;
use crate::types::{ServiceDate, DATE_FORMAT};

/// `PATCH /api/foodtrucks/schedule` body.
///
/// The actionable meal is set to `false`; the other flag is copied from
/// the record and left out entirely when the record does not carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealUpdate {
    #[serde(rename = "registrationid")]
    pub registration_id: RegistrationId,
    #[serde(serialize_with = "serialize_date")]
    pub date: ServiceDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<bool>,
}

impl MealUpdate {
    /// Build the update that marks `decision.meal_kind` consumed.
    ///
    /// Fails with [`CoreError::PreconditionFailed`] when the decision says
    /// the meal is not available.
    pub fn consume(record: &RegistrantRecord, decision: &MealDecision) -> Result<Self, CoreError> {
        if !decision.is_available {
            return Err(CoreError::PreconditionFailed(format!(
                "{} is not available for registration {} on {}",
                decision.meal_kind, record.registration_id, record.date
            )));
        }
        let (lunch, dinner) = match decision.meal_kind {
            MealKind::Lunch => (Some(false), record.dinner_eligible),
            MealKind::Dinner => (record.lunch_eligible, Some(false)),
        };
        Ok(Self {
            registration_id: record.registration_id.clone(),
            date: record.date,
            lunch,
            dinner,
        })
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.registration_id.clone(), self.date)
    }
}

fn serialize_date<S: serde::Serializer>(date: &ServiceDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::record::ScheduleEntry;

    fn record(lunch: Option<bool>, dinner: Option<bool>) -> RegistrantRecord {
        RegistrantRecord::from_entry(
            ScheduleEntry {
                lunch,
                dinner,
                ..Default::default()
            },
            RecordKey::new(
                RegistrationId::parse("12345").unwrap(),
                ServiceDate::from_ymd_opt(2026, 10, 18).unwrap(),
            ),
        )
    }

    fn decision(meal_kind: MealKind, is_available: bool) -> MealDecision {
        MealDecision {
            meal_kind,
            is_available,
        }
    }

    #[test]
    fn lunch_update_preserves_dinner_flag() {
        let update = MealUpdate::consume(
            &record(Some(true), Some(true)),
            &decision(MealKind::Lunch, true),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"registrationid": "12345", "date": "2026-10-18", "lunch": false, "dinner": true})
        );
    }

    #[test]
    fn dinner_update_preserves_consumed_lunch() {
        let update = MealUpdate::consume(
            &record(Some(false), Some(true)),
            &decision(MealKind::Dinner, true),
        )
        .unwrap();
        assert_eq!(update.lunch, Some(false));
        assert_eq!(update.dinner, Some(false));
    }

    #[test]
    fn absent_other_flag_is_omitted() {
        let update = MealUpdate::consume(&record(Some(true), None), &decision(MealKind::Lunch, true))
            .unwrap();
        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("dinner").is_none());
    }

    #[test]
    fn unavailable_meal_fails_precondition() {
        assert_matches!(
            MealUpdate::consume(&record(Some(false), Some(true)), &decision(MealKind::Lunch, false)),
            Err(CoreError::PreconditionFailed(_))
        );
    }
}
