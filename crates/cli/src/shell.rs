//! Presentation shell: drives one lookup session per registrant.
//!
//! Each command is awaited to completion before the next is read, which
//! keeps at most one request in flight.

use mealcheck_client::{ClientConfig, ScheduleApi};
use mealcheck_core::alert::Alert;
use mealcheck_core::error::CoreError;
use mealcheck_core::lookup::LookupOutcome;
use mealcheck_core::profile::RegistrantProfile;
use mealcheck_core::registration::extract_registration_id;
use mealcheck_core::session::{Session, SessionState};
use mealcheck_core::types::LocalTime;

use crate::command::Command;

/// What the shell wants shown after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Alert(Alert),
    Profile(RegistrantProfile),
    /// Plain informational text.
    Info(String),
    Help,
    Quit,
}

pub const READY_MESSAGE: &str = "Scan a QR code or enter a registration ID.";

pub struct Shell {
    api: ScheduleApi,
    session: Session,
}

impl Shell {
    pub fn new(api: ScheduleApi) -> Self {
        Self {
            api,
            session: Session::new(),
        }
    }

    /// Build a shell talking to the service described by `config`.
    pub fn connect(config: &ClientConfig) -> Result<Self, CoreError> {
        Ok(Self::new(ScheduleApi::new(config)?))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one command at local time `now`.
    pub async fn handle(&mut self, command: Command, now: LocalTime) -> Reply {
        match command {
            Command::Lookup(raw) => self.lookup(Entry::Typed(raw), now).await,
            Command::Scan(payload) => self.lookup(Entry::Scanned(payload), now).await,
            Command::Confirm => self.confirm(now).await,
            Command::Profile(raw) => match self.api.fetch_profile(&raw).await {
                Ok(profile) => Reply::Profile(profile),
                Err(e) => Reply::Alert(Alert::for_error(&e)),
            },
            Command::Status => self.status(),
            Command::Reset => {
                self.session.reset();
                Reply::Info(READY_MESSAGE.to_string())
            }
            Command::Help => Reply::Help,
            Command::Quit => Reply::Quit,
        }
    }

    async fn lookup(&mut self, entry: Entry, now: LocalTime) -> Reply {
        if let Err(e) = self.session.start_lookup() {
            return Reply::Alert(Alert::for_error(&e));
        }
        let date = now.date();
        let outcome = match entry {
            Entry::Typed(raw) => self.api.lookup(&raw, date).await,
            Entry::Scanned(payload) => match extract_registration_id(&payload) {
                Ok(id) => {
                    tracing::debug!(registration_id = %id, "Scanned registration ID");
                    self.api.lookup_id(&id, date).await
                }
                Err(e) => LookupOutcome::from(e),
            },
        };
        match self.session.finish_lookup(outcome, now) {
            Ok(state) => state_reply(state),
            Err(e) => Reply::Alert(Alert::for_error(&e)),
        }
    }

    async fn confirm(&mut self, now: LocalTime) -> Reply {
        let (record, decision) = match self.session.start_mutation(now) {
            Ok(pair) => pair,
            Err(e) => return Reply::Alert(Alert::for_error(&e)),
        };
        let result = self.api.mark_consumed(&record, &decision).await;
        match self.session.finish_mutation(result) {
            Ok(state) => state_reply(state),
            Err(e) => Reply::Alert(Alert::for_error(&e)),
        }
    }

    fn status(&self) -> Reply {
        state_reply(self.session.state())
    }
}

enum Entry {
    Typed(String),
    Scanned(String),
}

fn state_reply(state: &SessionState) -> Reply {
    match Alert::for_state(state) {
        Some(alert) => Reply::Alert(alert),
        None => Reply::Info(READY_MESSAGE.to_string()),
    }
}
