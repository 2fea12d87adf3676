pub mod pricing;

pub use pricing::{PricingBreakdown, PricingConfig, PricingEngine, SERVICE_FEE_PERCENTAGE};
