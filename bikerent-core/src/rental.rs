use async_trait::async_trait;
use bikerent_shared::models::{BookingErrorPayload, BookingRequest, BookingResponse};

/// Shown when the rental service fails without a usable message
pub const GENERIC_BOOKING_FAILURE: &str = "Failed to book bike. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RentalError {
    /// The service answered with a typed error payload
    #[error("Booking rejected ({}): {}", .0.error_type, .0.message)]
    Rejected(BookingErrorPayload),

    /// Anything else: network failure, unreadable response, timeout
    #[error("Rental service unavailable: {0}")]
    Transport(String),
}

impl RentalError {
    /// Message to put in front of the user
    pub fn user_message(&self) -> String {
        match self {
            RentalError::Rejected(payload) if !payload.message.trim().is_empty() => {
                payload.message.clone()
            }
            _ => GENERIC_BOOKING_FAILURE.to_string(),
        }
    }
}

impl From<BookingErrorPayload> for RentalError {
    fn from(payload: BookingErrorPayload) -> Self {
        RentalError::Rejected(payload)
    }
}

/// Remote endpoint that accepts bike rentals
#[async_trait]
pub trait RentalService: Send + Sync {
    /// Rent a bike for the requested dates
    async fn rent_bike(&self, request: &BookingRequest) -> Result<BookingResponse, RentalError>;
}
