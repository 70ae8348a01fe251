//! OSRM HTTP client.

use std::time::Duration;

use tracing::debug;

use crate::domain::Coordinate;
use crate::error::{Provider, TripError};
use crate::routing::{DrivingBackend, DrivingLeg, excerpt};

use super::types::TableResponse;

/// Default base URL for a local OSRM instance.
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "driving";

/// Default user agent for OSRM requests.
const DEFAULT_USER_AGENT: &str = "trip-engine/0.1";

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM service
    pub base_url: String,
    /// Routing profile (`driving`, `car`, ...)
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string for requests
    pub user_agent: String,
}

impl OsrmConfig {
    /// Create a config for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Driving matrix client for an OSRM service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, TripError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TripError::from_reqwest(Provider::Car, &e))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            profile: config.profile,
        })
    }

    /// Table URL with `origin` first, followed by the destinations.
    fn table_url(&self, origin: Coordinate, destinations: &[Coordinate]) -> String {
        let coords = std::iter::once(origin)
            .chain(destinations.iter().copied())
            .map(|c| format!("{},{}", c.longitude(), c.latitude()))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.profile,
            coords
        )
    }
}

impl DrivingBackend for OsrmClient {
    async fn driving_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<DrivingLeg>, TripError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.table_url(origin, destinations);
        debug!(%url, destinations = destinations.len(), "Requesting OSRM table");

        let response = self
            .http
            .get(&url)
            .query(&[("sources", "0"), ("annotations", "duration,distance")])
            .send()
            .await
            .map_err(|e| TripError::from_reqwest(Provider::Car, &e))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TripError::RateLimited {
                provider: Provider::Car,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TripError::upstream(
                Provider::Car,
                format!("OSRM status {}: {}", status.as_u16(), excerpt(&body)),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TripError::from_reqwest(Provider::Car, &e))?;

        let table: TableResponse = serde_json::from_str(&body).map_err(|e| {
            TripError::malformed(Provider::Car, format!("{e} (body: {})", excerpt(&body)))
        })?;

        table.into_legs(destinations.len())
    }
}
