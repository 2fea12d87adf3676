pub mod app_config;
pub mod rental;

pub use app_config::{AppConfig, DEFAULT_USER_ID};
pub use rental::{RentalError, RentalService, GENERIC_BOOKING_FAILURE};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

pub type CoreResult<T> = Result<T, CoreError>;
