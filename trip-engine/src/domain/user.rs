//! User identity and pricing settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GUID-backed user identifier.
///
/// The all-zero id is reserved for the fleet-wide default pricing and is
/// never a real user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Sentinel id under which default pricing is stored.
    pub const DEFAULT: UserId = UserId(Uuid::nil());

    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Whether this is the default-settings sentinel.
    pub fn is_default(&self) -> bool {
        self.0.is_nil()
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(UserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Per-user pricing preferences.
///
/// When `cents_per_hour` is set it takes precedence over
/// `cents_per_kilometer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: UserId,
    #[serde(default)]
    pub cents_per_kilometer: Option<u32>,
    #[serde(default)]
    pub cents_per_hour: Option<u32>,
}

impl UserSettings {
    /// Settings with no pricing configured.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            cents_per_kilometer: None,
            cents_per_hour: None,
        }
    }

    pub fn with_cents_per_kilometer(mut self, cents: u32) -> Self {
        self.cents_per_kilometer = Some(cents);
        self
    }

    pub fn with_cents_per_hour(mut self, cents: u32) -> Self {
        self.cents_per_hour = Some(cents);
        self
    }
}
