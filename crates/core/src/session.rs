//! Lookup session state machine.
//!
//! One session covers a single registration ID on a single date:
//!
//! ```text
//! Idle -> Fetching -> {Found, NotFound, InvalidInput, TransportError}
//! Found -> Mutating -> {Updated, TransportError}
//! ```
//!
//! Only one request may be in flight per session. The caller awaits each
//! request before issuing the next; the session refuses re-entry instead of
//! locking.

use crate::error::CoreError;
use crate::lookup::LookupOutcome;
use crate::meal::{decide, MealDecision, MealKind};
use crate::record::RegistrantRecord;
use crate::types::LocalTime;

/// Discriminant of [`SessionState`], used by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Idle,
    Fetching,
    Found,
    NotFound,
    InvalidInput,
    Mutating,
    Updated,
    TransportError,
}

pub mod state_machine {
    use super::SessionPhase::{self, *};

    /// Phases reachable from `from`.
    ///
    /// `NotFound`, `InvalidInput`, `Updated` and `TransportError` end the
    /// session; only a reset or a fresh lookup leaves them. Resetting while a
    /// request is in flight is allowed and its result is discarded.
    pub fn valid_transitions(from: SessionPhase) -> &'static [SessionPhase] {
        match from {
            Idle => &[Fetching],
            Fetching => &[Found, NotFound, InvalidInput, TransportError, Idle],
            Found => &[Mutating, Fetching, Idle],
            Mutating => &[Updated, TransportError, NotFound, InvalidInput, Idle],
            NotFound | InvalidInput | Updated | TransportError => &[Fetching, Idle],
        }
    }

    pub fn can_transition(from: SessionPhase, to: SessionPhase) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a transition, returning a readable message for invalid ones.
    pub fn validate_transition(from: SessionPhase, to: SessionPhase) -> Result<(), String> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(format!("Invalid session transition: {from:?} -> {to:?}"))
        }
    }
}

/// Current state of a session, with the data each phase owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Fetching,
    Found {
        record: RegistrantRecord,
        decision: MealDecision,
    },
    NotFound,
    InvalidInput {
        message: String,
    },
    Mutating {
        record: RegistrantRecord,
        decision: MealDecision,
    },
    Updated {
        record: RegistrantRecord,
        meal_kind: MealKind,
    },
    /// `retained` is the pre-mutation record when the failure happened
    /// while mutating, and `None` when it happened during the lookup.
    TransportError {
        detail: String,
        retained: Option<RegistrantRecord>,
    },
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Fetching => SessionPhase::Fetching,
            SessionState::Found { .. } => SessionPhase::Found,
            SessionState::NotFound => SessionPhase::NotFound,
            SessionState::InvalidInput { .. } => SessionPhase::InvalidInput,
            SessionState::Mutating { .. } => SessionPhase::Mutating,
            SessionState::Updated { .. } => SessionPhase::Updated,
            SessionState::TransportError { .. } => SessionPhase::TransportError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase(), SessionPhase::Fetching | SessionPhase::Mutating)
    }

    /// Record currently shown to the user, if any.
    pub fn record(&self) -> Option<&RegistrantRecord> {
        match &self.state {
            SessionState::Found { record, .. }
            | SessionState::Mutating { record, .. }
            | SessionState::Updated { record, .. } => Some(record),
            SessionState::TransportError { retained, .. } => retained.as_ref(),
            _ => None,
        }
    }

    /// Dismiss the current result. Any in-flight result will be discarded.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Enter `Fetching`, restarting the session from whatever ended last.
    pub fn start_lookup(&mut self) -> Result<(), CoreError> {
        if self.is_busy() {
            return Err(CoreError::PreconditionFailed(
                "A request is already in progress".to_string(),
            ));
        }
        self.transition(SessionState::Fetching)
    }

    /// Apply the outcome of the lookup started by [`Session::start_lookup`].
    ///
    /// Fails, leaving the state untouched, when no lookup is in flight (for
    /// instance after a reset), so late results are dropped.
    pub fn finish_lookup(
        &mut self,
        outcome: LookupOutcome,
        now: LocalTime,
    ) -> Result<&SessionState, CoreError> {
        self.expect_phase(SessionPhase::Fetching)?;
        let next = match outcome {
            LookupOutcome::Found(record) => {
                let decision = decide(&record, now);
                SessionState::Found { record, decision }
            }
            LookupOutcome::NotFound => SessionState::NotFound,
            LookupOutcome::InvalidInput(message) => SessionState::InvalidInput { message },
            LookupOutcome::Transport(detail) => SessionState::TransportError {
                detail,
                retained: None,
            },
        };
        self.transition(next)?;
        Ok(&self.state)
    }

    /// Enter `Mutating` for the meal actionable at `now`.
    ///
    /// The decision is recomputed for `now`. A record from another date is
    /// discarded and the session returns to `Idle`. An unavailable meal
    /// leaves the session in `Found`.
    pub fn start_mutation(
        &mut self,
        now: LocalTime,
    ) -> Result<(RegistrantRecord, MealDecision), CoreError> {
        let record = match &self.state {
            SessionState::Found { record, .. } => record.clone(),
            other => {
                return Err(CoreError::PreconditionFailed(format!(
                    "No registrant to update (session is {:?})",
                    other.phase()
                )))
            }
        };

        if !record.is_current(now.date()) {
            self.reset();
            return Err(CoreError::PreconditionFailed(format!(
                "Record for {} is out of date, look the registrant up again",
                record.date
            )));
        }

        let decision = decide(&record, now);
        if !decision.is_available {
            self.state = SessionState::Found { record, decision };
            return Err(CoreError::PreconditionFailed(format!(
                "{} has already been availed",
                decision.meal_kind
            )));
        }

        self.transition(SessionState::Mutating {
            record: record.clone(),
            decision,
        })?;
        Ok((record, decision))
    }

    /// Apply the result of the mutation started by
    /// [`Session::start_mutation`].
    ///
    /// On success the server's record replaces the local one. A transport
    /// failure keeps the pre-mutation record.
    pub fn finish_mutation(
        &mut self,
        result: Result<RegistrantRecord, CoreError>,
    ) -> Result<&SessionState, CoreError> {
        let (previous, decision) = match &self.state {
            SessionState::Mutating { record, decision } => (record.clone(), *decision),
            other => {
                return Err(CoreError::PreconditionFailed(format!(
                    "No update in progress (session is {:?})",
                    other.phase()
                )))
            }
        };
        let next = match result {
            Ok(record) => SessionState::Updated {
                record,
                meal_kind: decision.meal_kind,
            },
            Err(CoreError::NotFound { .. }) => SessionState::NotFound,
            Err(CoreError::InvalidInput(message)) => SessionState::InvalidInput { message },
            Err(CoreError::Transport(detail) | CoreError::PreconditionFailed(detail)) => {
                SessionState::TransportError {
                    detail,
                    retained: Some(previous),
                }
            }
        };
        self.transition(next)?;
        Ok(&self.state)
    }

    fn expect_phase(&self, phase: SessionPhase) -> Result<(), CoreError> {
        if self.phase() == phase {
            Ok(())
        } else {
            Err(CoreError::PreconditionFailed(format!(
                "Expected session to be {phase:?}, but it is {:?}",
                self.phase()
            )))
        }
    }

    fn transition(&mut self, next: SessionState) -> Result<(), CoreError> {
        state_machine::validate_transition(self.phase(), next.phase())
            .map_err(CoreError::PreconditionFailed)?;
        self.state = next;
        Ok(())
    }
}
