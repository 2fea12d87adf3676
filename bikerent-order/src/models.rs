use bikerent_shared::models::{Bike, BookingResponse};
use serde::Serialize;

/// Booking submission lifecycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded { details: BookingResponse },
    Failed { message: String },
}

/// What the success screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub bike: Option<Bike>,
    pub details: BookingResponse,
}

/// The booking button as it should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub label: &'static str,
    pub enabled: bool,
}

impl ButtonState {
    pub const BOOKING: &'static str = "Booking...";
    pub const READY: &'static str = "Add to booking";
    pub const SELECT_DATES: &'static str = "Select dates to continue";

    pub fn new(is_booking_ready: bool, is_booking: bool, can_submit: bool) -> Self {
        let label = if is_booking {
            Self::BOOKING
        } else if is_booking_ready {
            Self::READY
        } else {
            Self::SELECT_DATES
        };

        Self { label, enabled: can_submit }
    }
}
