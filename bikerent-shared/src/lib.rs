pub mod models;

pub use models::{Bike, BookingErrorPayload, BookingRequest, BookingResponse};
