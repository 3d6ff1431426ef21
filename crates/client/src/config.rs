use mealcheck_core::endpoint::{ServerAddress, DEFAULT_BASE_URL, DEFAULT_SERVER_PORT};
use mealcheck_core::error::CoreError;

/// Client configuration loaded from environment variables.
///
/// Read once at start-up and handed to [`crate::ScheduleApi::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the schedule service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout; `None` keeps the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `MEALCHECK_BASE_URL`             | --                      |
    /// | `MEALCHECK_SERVER_IP`            | --                      |
    /// | `MEALCHECK_SERVER_PORT`          | `8000`                  |
    /// | `MEALCHECK_REQUEST_TIMEOUT_SECS` | transport default       |
    ///
    /// `MEALCHECK_BASE_URL` wins over `MEALCHECK_SERVER_IP`. With neither
    /// set the base URL is `http://localhost:8000`.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let base_url = match (get("MEALCHECK_BASE_URL"), get("MEALCHECK_SERVER_IP")) {
            (Some(url), _) => url.trim().trim_end_matches('/').to_string(),
            (None, Some(ip)) => {
                let address = ServerAddress::parse(&ip)?;
                let port = match get("MEALCHECK_SERVER_PORT") {
                    Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                        CoreError::InvalidInput(format!(
                            "MEALCHECK_SERVER_PORT must be a valid port (got {raw})"
                        ))
                    })?,
                    None => DEFAULT_SERVER_PORT,
                };
                address.base_url(port)
            }
            (None, None) => DEFAULT_BASE_URL.to_string(),
        };

        let request_timeout_secs = get("MEALCHECK_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    CoreError::InvalidInput(format!(
                        "MEALCHECK_REQUEST_TIMEOUT_SECS must be a whole number of seconds (got {raw})"
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            base_url,
            request_timeout_secs,
        })
    }
}
