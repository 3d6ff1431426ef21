/// Calendar date a schedule applies to. Always the device's local "today"
/// when a session starts.
pub type ServiceDate = chrono::NaiveDate;

/// Local wall-clock time used for meal-window decisions.
pub type LocalTime = chrono::NaiveDateTime;

/// Wire format of a [`ServiceDate`] (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a service date the way the schedule service expects it.
pub fn format_date(date: ServiceDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Server-side timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
