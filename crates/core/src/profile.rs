//! Registrant profile as served by the user-data endpoint.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Descriptive profile of a registrant. Not used in any meal decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantProfile {
    #[serde(rename = "registrationid")]
    pub registration_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}
