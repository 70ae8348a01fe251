//! Trip pricing.
//!
//! Converts a driving distance and duration into a cost in cents using the
//! owning user's settings, the fleet-wide default, or a fallback constant.
//! All costs round up.

mod cache;
mod config;
mod policy;

pub use cache::SettingsCache;
pub use config::{DEFAULT_CENTS_PER_KILOMETER, PricingConfig};
pub use policy::{CostPolicy, distance_cost, time_cost};
