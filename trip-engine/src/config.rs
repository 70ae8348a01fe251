//! Engine configuration, read from the environment.

use std::str::FromStr;

use thiserror::Error;

use crate::pricing::PricingConfig;
use crate::routing::motis::MotisConfig;
use crate::routing::osrm::OsrmConfig;

/// OSRM base URL.
pub const OSRM_URL_VAR: &str = "TRIP_OSRM_URL";
/// MOTIS base URL.
pub const MOTIS_URL_VAR: &str = "TRIP_MOTIS_URL";
/// Fallback distance rate when no default settings exist.
pub const DEFAULT_CENTS_PER_KM_VAR: &str = "TRIP_DEFAULT_CENTS_PER_KM";
/// Maximum concurrent MOTIS requests.
pub const MAX_CONCURRENT_VAR: &str = "TRIP_MAX_CONCURRENT";
/// Timeout for both backends, in seconds.
pub const TIMEOUT_SECS_VAR: &str = "TRIP_TIMEOUT_SECS";

/// Errors reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Configuration for every engine collaborator.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub osrm: OsrmConfig,
    pub motis: MotisConfig,
    pub pricing: PricingConfig,
}

impl EngineConfig {
    /// Defaults overridden by any `TRIP_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(OSRM_URL_VAR) {
            config.osrm.base_url = url;
        }
        if let Some(url) = lookup(MOTIS_URL_VAR) {
            config.motis.base_url = url;
        }
        if let Some(cents) = parse(&lookup, DEFAULT_CENTS_PER_KM_VAR, "a non-negative integer")? {
            config.pricing = config.pricing.with_fallback_cents_per_kilometer(cents);
        }
        if let Some(n) = parse::<usize, _>(&lookup, MAX_CONCURRENT_VAR, "a positive integer")? {
            if n == 0 {
                return Err(ConfigError::InvalidValue {
                    var: MAX_CONCURRENT_VAR,
                    value: n.to_string(),
                    expected: "a positive integer",
                });
            }
            config.motis = config.motis.with_max_concurrent(n);
        }
        if let Some(secs) = parse(&lookup, TIMEOUT_SECS_VAR, "a number of seconds")? {
            config.osrm = config.osrm.with_timeout(secs);
            config.motis = config.motis.with_timeout(secs);
        }

        Ok(config)
    }
}

fn parse<T, F>(lookup: &F, var: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            var,
            value,
            expected,
        })
}
