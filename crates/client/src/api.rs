//! REST client for the schedule service.
//!
//! Wraps the lookup (`GET /api/foodtrucks/schedule`), the meal-avail
//! mutation (`PATCH /api/foodtrucks/schedule`) and the profile lookup
//! (`GET /api/userdata/registration/{id}`) using [`reqwest`].

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use mealcheck_core::endpoint::Endpoints;
use mealcheck_core::error::CoreError;
use mealcheck_core::lookup::{classify_response, error_message, LookupOutcome};
use mealcheck_core::meal::MealDecision;
use mealcheck_core::profile::RegistrantProfile;
use mealcheck_core::record::{RecordKey, RegistrantRecord};
use mealcheck_core::registration::RegistrationId;
use mealcheck_core::types::ServiceDate;
use mealcheck_core::update::MealUpdate;

use crate::config::ClientConfig;

const APPLICATION_JSON: &str = "application/json";

/// Errors raised while setting up the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        CoreError::Transport(err.to_string())
    }
}

/// HTTP client for one schedule service.
#[derive(Debug, Clone)]
pub struct ScheduleApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ScheduleApi {
    /// Create a client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self::with_client(
            builder.build()?,
            Endpoints::new(config.base_url.clone()),
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Look up the schedule of `registration_id` on `date`.
    ///
    /// The ID must be digits only; anything else is answered with
    /// [`LookupOutcome::InvalidInput`] without touching the network.
    pub async fn lookup(&self, registration_id: &str, date: ServiceDate) -> LookupOutcome {
        match RegistrationId::parse(registration_id) {
            Ok(id) => self.lookup_id(&id, date).await,
            Err(e) => {
                tracing::debug!(raw = %registration_id, error = %e, "Rejected registration ID");
                LookupOutcome::from(e)
            }
        }
    }

    /// Look up the schedule of an already validated ID.
    pub async fn lookup_id(&self, id: &RegistrationId, date: ServiceDate) -> LookupOutcome {
        let key = RecordKey::new(id.clone(), date);
        let url = self.endpoints.lookup_url(id, date);
        tracing::debug!(registration_id = %id, url = %url, "Fetching schedule");

        let request = self
            .client
            .get(&url)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON);

        let outcome = match send(request).await {
            Ok((status, body)) => {
                tracing::debug!(registration_id = %id, status, "Schedule response");
                classify_response(status, &body, &key)
            }
            Err(e) => LookupOutcome::Transport(e.to_string()),
        };

        match &outcome {
            LookupOutcome::Found(_) => tracing::info!(registration_id = %id, "Registrant found"),
            LookupOutcome::NotFound => tracing::info!(registration_id = %id, "Registrant not found"),
            LookupOutcome::InvalidInput(msg) => {
                tracing::info!(registration_id = %id, error = %msg, "Lookup rejected by server")
            }
            LookupOutcome::Transport(detail) => {
                tracing::warn!(registration_id = %id, error = %detail, "Lookup failed")
            }
        }
        outcome
    }

    /// Mark the meal named by `decision` as consumed.
    ///
    /// The server's returned record is the result; nothing is patched
    /// locally. Fails with [`CoreError::PreconditionFailed`] before any
    /// network call when the meal is not available.
    pub async fn mark_consumed(
        &self,
        record: &RegistrantRecord,
        decision: &MealDecision,
    ) -> Result<RegistrantRecord, CoreError> {
        let update = MealUpdate::consume(record, decision)?;
        let key = update.key();
        tracing::debug!(
            registration_id = %key.registration_id,
            meal = %decision.meal_kind,
            "Marking meal consumed",
        );

        let request = self
            .client
            .patch(self.endpoints.mutation_url())
            .header(ACCEPT, APPLICATION_JSON)
            .json(&update);

        let result = match send(request).await {
            Ok((status, body)) => classify_response(status, &body, &key).into_result(&key),
            Err(e) => Err(CoreError::Transport(e.to_string())),
        };

        match &result {
            Ok(_) => tracing::info!(
                registration_id = %key.registration_id,
                meal = %decision.meal_kind,
                "Meal marked consumed",
            ),
            Err(e) => tracing::warn!(
                registration_id = %key.registration_id,
                code = e.code(),
                error = %e,
                "Meal update failed",
            ),
        }
        result
    }

    /// Fetch the descriptive profile of a registrant.
    pub async fn fetch_profile(&self, registration_id: &str) -> Result<RegistrantProfile, CoreError> {
        let id = RegistrationId::parse(registration_id)?;
        let url = self.endpoints.profile_url(&id);
        tracing::debug!(registration_id = %id, url = %url, "Fetching profile");

        let request = self.client.get(&url).header(ACCEPT, APPLICATION_JSON);
        let (status, body) = send(request)
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        match status {
            200..=299 => serde_json::from_slice(&body)
                .map_err(|e| CoreError::Transport(format!("malformed profile body: {e}"))),
            404 => Err(CoreError::NotFound {
                registration_id: id.to_string(),
                date: None,
            }),
            400 => Err(CoreError::InvalidInput(
                error_message(&body).unwrap_or_else(|| "Invalid registration ID".to_string()),
            )),
            _ => Err(CoreError::Transport(format!("unexpected status {status}"))),
        }
    }
}

/// Send `request`, returning the status code and the raw body.
async fn send(request: reqwest::RequestBuilder) -> Result<(u16, Vec<u8>), reqwest::Error> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    Ok((status, body.to_vec()))
}
