use crate::types::ServiceDate;

/// Session-level error taxonomy.
///
/// Every variant is recoverable: the presentation layer shows an alert and
/// the session returns to idle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Bad local input. No network call was made for it.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote service confirmed there is no such registrant or schedule.
    /// `date` is `None` for date-independent resources such as profiles.
    #[error("Registrant not found: {registration_id}{}", on_date(.date))]
    NotFound {
        registration_id: String,
        date: Option<ServiceDate>,
    },

    /// An operation was invoked in a state that does not allow it.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Network failure, unreachable host, or a server-side (5xx) error.
    #[error("Transport error: {0}")]
    Transport(String),
}

fn on_date(date: &Option<ServiceDate>) -> String {
    date.map(|d| format!(" on {d}")).unwrap_or_default()
}

impl CoreError {
    /// Short machine-readable code, used in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidInput(_) => "INVALID_INPUT",
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::PreconditionFailed(_) => "PRECONDITION_FAILED",
            CoreError::Transport(_) => "TRANSPORT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_the_key() {
        let err = CoreError::NotFound {
            registration_id: "12345".to_string(),
            date: ServiceDate::from_ymd_opt(2026, 10, 18),
        };
        assert_eq!(
            err.to_string(),
            "Registrant not found: 12345 on 2026-10-18"
        );
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn not_found_without_date() {
        let err = CoreError::NotFound {
            registration_id: "77".to_string(),
            date: None,
        };
        assert_eq!(err.to_string(), "Registrant not found: 77");
    }
}
