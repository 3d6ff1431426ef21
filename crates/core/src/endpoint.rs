//! Endpoint Resolver: base address plus path templates of the schedule
//! service. Pure string composition, no network access.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::registration::RegistrationId;
use crate::types::{format_date, ServiceDate};

/// Path of the schedule resource (lookup and mutation).
pub const SCHEDULE_PATH: &str = "/api/foodtrucks/schedule";

/// Path prefix of the registrant profile resource.
pub const USER_DATA_PATH: &str = "/api/userdata/registration";

/// Port the schedule service listens on unless configured otherwise.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Base URL used when no server address has been configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("valid regex"));

/// Resolved URLs for one configured service base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Trailing slashes on `base_url` are dropped. Malformed addresses are
    /// not detected here; they surface as transport failures.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/api/foodtrucks/schedule?registrationid={id}&date={date}`
    pub fn lookup_url(&self, id: &RegistrationId, date: ServiceDate) -> String {
        format!(
            "{}{SCHEDULE_PATH}?registrationid={id}&date={}",
            self.base_url,
            format_date(date)
        )
    }

    /// `PATCH {base}/api/foodtrucks/schedule`, parameters in the body.
    pub fn mutation_url(&self) -> String {
        format!("{}{SCHEDULE_PATH}", self.base_url)
    }

    /// `GET {base}/api/userdata/registration/{id}`
    pub fn profile_url(&self, id: &RegistrationId) -> String {
        format!("{}{USER_DATA_PATH}/{id}", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// ---------------------------------------------------------------------------
// Saved server address
// ---------------------------------------------------------------------------

/// A validated IPv4 address of the machine running the schedule service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress(String);

impl ServerAddress {
    /// Accepts four dot-separated groups of 1-3 digits, each within 0-255.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let ip = raw.trim();
        if ip.is_empty() {
            return Err(CoreError::InvalidInput(
                "IP address cannot be empty".to_string(),
            ));
        }
        let in_range = || {
            ip.split('.')
                .all(|part| part.parse::<u16>().is_ok_and(|n| n <= 255))
        };
        if !IPV4_RE.is_match(ip) || !in_range() {
            return Err(CoreError::InvalidInput(format!(
                "Invalid IP address format: {ip}"
            )));
        }
        Ok(Self(ip.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `http://{ip}:{port}`
    pub fn base_url(&self, port: u16) -> String {
        format!("http://{}:{port}", self.0)
    }
}
