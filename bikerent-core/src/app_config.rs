use serde::Deserialize;
use std::env;

use crate::{CoreError, CoreResult};

/// User id sent with bookings when none is configured
pub const DEFAULT_USER_ID: i64 = 1921;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Raw user identity; see [`AppConfig::resolved_user_id`]
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    #[serde(default = "default_service_fee_percentage")]
    pub service_fee_percentage: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self { service_fee_percentage: default_service_fee_percentage() }
    }
}

fn default_service_fee_percentage() -> f64 { 0.1 }

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutSettings {
    /// Viewports narrower than this use the mobile layout
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self { mobile_breakpoint_px: default_mobile_breakpoint() }
    }
}

fn default_mobile_breakpoint() -> u32 { 1200 }

impl AppConfig {
    pub fn load() -> CoreResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // BIKERENT_USER_ID=42, BIKERENT_PRICING__SERVICE_FEE_PERCENTAGE=0.15
            .add_source(
                config::Environment::with_prefix("BIKERENT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on its own, without files or environment
    pub fn from_toml(source: &str) -> CoreResult<Self> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        let pct = self.pricing.service_fee_percentage;
        if !pct.is_finite() || !(0.0..1.0).contains(&pct) {
            return Err(CoreError::ValidationError(format!(
                "service_fee_percentage must be within [0, 1), got {}",
                pct
            )));
        }
        if self.layout.mobile_breakpoint_px == 0 {
            return Err(CoreError::ValidationError(
                "mobile_breakpoint_px must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Numeric user id, falling back to [`DEFAULT_USER_ID`] when unset, non-numeric or zero
    pub fn resolved_user_id(&self) -> i64 {
        let resolved = self
            .user_id
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id != 0);

        if resolved.is_none() && self.user_id.is_some() {
            tracing::warn!("Ignoring invalid user_id {:?}, using default", self.user_id);
        }
        resolved.unwrap_or(DEFAULT_USER_ID)
    }
}
