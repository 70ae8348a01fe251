//! Pricing configuration.

/// Rate used when neither the user nor the default settings define one.
pub const DEFAULT_CENTS_PER_KILOMETER: u32 = 30;

/// Configuration for a [`CostPolicy`](super::CostPolicy).
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Cents per kilometer when no settings provide a rate.
    pub fallback_cents_per_kilometer: u32,
}

impl PricingConfig {
    /// Set the fallback distance rate.
    pub fn with_fallback_cents_per_kilometer(mut self, cents: u32) -> Self {
        self.fallback_cents_per_kilometer = cents;
        self
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fallback_cents_per_kilometer: DEFAULT_CENTS_PER_KILOMETER,
        }
    }
}
