//! MOTIS HTTP client.
//!
//! Plans are requested concurrently, one per destination, so the client
//! bounds in-flight requests with a semaphore.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;
use crate::error::{Provider, TripError};
use crate::routing::{TransitBackend, TransitCandidates, excerpt};

use super::types::PlanResponse;

/// Default base URL for a local MOTIS instance.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the MOTIS client.
#[derive(Debug, Clone)]
pub struct MotisConfig {
    /// Base URL of the MOTIS service
    pub base_url: String,
    /// Maximum concurrent plan requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Fixed departure time; `None` plans from the current time
    pub departure: Option<DateTime<Utc>>,
}

impl MotisConfig {
    /// Create a config for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Plan every request for a fixed departure time.
    pub fn with_departure(mut self, departure: DateTime<Utc>) -> Self {
        self.departure = Some(departure);
        self
    }
}

impl Default for MotisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            departure: None,
        }
    }
}

/// Transit planning client for a MOTIS service.
#[derive(Debug, Clone)]
pub struct MotisClient {
    http: reqwest::Client,
    base_url: String,
    departure: Option<DateTime<Utc>>,
    semaphore: Arc<Semaphore>,
}

impl MotisClient {
    /// Create a new MOTIS client with the given configuration.
    pub fn new(config: MotisConfig) -> Result<Self, TripError> {
        if config.max_concurrent == 0 {
            return Err(TripError::InvalidInput(
                "MOTIS max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TripError::from_reqwest(Provider::Train, &e))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            departure: config.departure,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    fn plan_url(&self) -> String {
        format!("{}/api/v1/plan", self.base_url.trim_end_matches('/'))
    }

    /// Query parameters for one plan request.
    fn plan_query(&self, origin: Coordinate, destination: Coordinate) -> [(&'static str, String); 3] {
        let time = self.departure.unwrap_or_else(Utc::now);
        [
            ("fromPlace", place_param(origin)),
            ("toPlace", place_param(destination)),
            ("time", time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ]
    }
}

/// MOTIS expects `lat,lon`.
fn place_param(c: Coordinate) -> String {
    format!("{},{}", c.latitude(), c.longitude())
}

impl TransitBackend for MotisClient {
    async fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<TransitCandidates, TripError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TripError::upstream(Provider::Train, "request semaphore closed"))?;

        let url = self.plan_url();
        debug!(%origin, %destination, "Requesting MOTIS plan");

        let response = self
            .http
            .get(&url)
            .query(&self.plan_query(origin, destination))
            .send()
            .await
            .map_err(|e| TripError::from_reqwest(Provider::Train, &e))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TripError::RateLimited {
                provider: Provider::Train,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TripError::upstream(
                Provider::Train,
                format!("MOTIS status {}: {}", status.as_u16(), excerpt(&body)),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TripError::from_reqwest(Provider::Train, &e))?;

        let plan: PlanResponse = serde_json::from_str(&body).map_err(|e| {
            TripError::malformed(Provider::Train, format!("{e} (body: {})", excerpt(&body)))
        })?;

        plan.into_candidates()
    }
}
