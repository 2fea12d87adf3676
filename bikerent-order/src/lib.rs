pub mod models;
pub mod submission;
pub mod overview;
pub mod layout;
pub mod rental;

pub use models::{BookingConfirmation, ButtonState, SubmissionState};
pub use submission::{BookingSubmission, InFlight, SubmissionTicket};
pub use overview::{BookingOverview, OverviewSnapshot};
pub use layout::{renderer_for, DesktopLayout, LayoutKind, MobileLayout, OverviewRenderer};
pub use rental::LocalRentalService;
