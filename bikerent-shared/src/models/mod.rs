pub mod bike;
pub mod rental;

pub use bike::Bike;
pub use rental::{BookingErrorPayload, BookingRequest, BookingResponse};
