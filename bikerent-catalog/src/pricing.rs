use bikerent_calendar::DateRange;
use serde::{Deserialize, Serialize};

/// Share of the rent charged as service fee
pub const SERVICE_FEE_PERCENTAGE: f64 = 0.1;

/// Price of a rental, derived from a date range and a daily rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub subtotal: f64,
    pub service_fee: f64,
    pub total: f64,
    pub number_of_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fraction of the subtotal charged on top, e.g. 0.1
    pub service_fee_percentage: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_fee_percentage: SERVICE_FEE_PERCENTAGE,
        }
    }
}

/// Rental pricing
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Fee for an amount, always rounded down to a whole unit
    pub fn service_fee(&self, amount: f64) -> f64 {
        (amount * self.config.service_fee_percentage).floor()
    }

    /// Price a range at `rate_by_day`. Both endpoints are billed; an
    /// incomplete range prices to all zeros.
    pub fn calculate(&self, range: &DateRange, rate_by_day: f64) -> PricingBreakdown {
        let Some((start, end)) = range.bounds() else {
            return PricingBreakdown::default();
        };

        let number_of_days = (end - start).num_days() + 1;
        let subtotal = number_of_days as f64 * rate_by_day;
        let service_fee = self.service_fee(subtotal);

        PricingBreakdown {
            subtotal,
            service_fee,
            total: subtotal + service_fee,
            number_of_days,
        }
    }

    /// One-day estimate shown before the user has picked a full range
    pub fn idle_estimate(&self, rate_by_day: f64) -> PricingBreakdown {
        let service_fee = self.service_fee(rate_by_day);
        PricingBreakdown {
            subtotal: rate_by_day,
            service_fee,
            total: rate_by_day + service_fee,
            number_of_days: 1,
        }
    }
}
