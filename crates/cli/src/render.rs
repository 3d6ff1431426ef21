//! Plain-text rendering of shell replies.

use mealcheck_core::alert::{Alert, AlertAction};
use mealcheck_core::profile::RegistrantProfile;

use crate::shell::Reply;

pub const HELP: &str = "\
Commands:
  <registration id>   look up a registrant by typed ID
  scan <payload>      look up a registrant from a scanned QR payload
  avail               mark the current meal as availed
  profile <id>        show a registrant's profile
  status              show the current result again
  reset               clear the current result
  quit                leave";

/// Text to print for `reply`; `None` when nothing should be printed.
pub fn render(reply: &Reply) -> Option<String> {
    match reply {
        Reply::Alert(alert) => Some(render_alert(alert)),
        Reply::Profile(profile) => Some(render_profile(profile)),
        Reply::Info(text) => Some(text.clone()),
        Reply::Help => Some(HELP.to_string()),
        Reply::Quit => None,
    }
}

pub fn render_alert(alert: &Alert) -> String {
    let mut out = format!("== {} ==\n{}\n", alert.title, alert.message.trim());
    let hint = match alert.action {
        AlertAction::ConfirmMeal(_) => {
            format!("[{}] type 'avail' to confirm", alert.action.label())
        }
        AlertAction::TryAgain => format!("[{}] enter another ID", alert.action.label()),
        AlertAction::Dismiss => format!("[{}]", alert.action.label()),
    };
    out.push_str(&hint);
    out
}

fn render_profile(profile: &RegistrantProfile) -> String {
    let mut out = format!(
        "== Registrant ==\nRegistration ID: {}\nName: {}\nType: {}",
        profile.registration_id,
        profile.name.as_deref().unwrap_or("-"),
        profile.kind.as_deref().unwrap_or("-"),
    );
    if let Some(created_at) = profile.created_at {
        out.push_str(&format!("\nRegistered: {}", created_at.format("%Y-%m-%d")));
    }
    out
}
