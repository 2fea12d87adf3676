use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bikerent_calendar::DateRange;
use bikerent_catalog::PricingEngine;
use bikerent_core::{RentalError, RentalService};
use bikerent_order::{BookingOverview, LocalRentalService, SubmissionState};
use bikerent_shared::models::{Bike, BookingErrorPayload, BookingRequest, BookingResponse};
use chrono::NaiveDate;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn bike() -> Bike {
    Bike::new(7, "Cannondale", 20.0)
}

fn three_days() -> BookingResponse {
    BookingResponse { rent_amount: 60.0, fee: 6.0, total_amount: 66.0 }
}

/// Records every request and answers with a fixed result
struct ScriptedService {
    result: Result<BookingResponse, RentalError>,
    seen: Mutex<Vec<BookingRequest>>,
}

impl ScriptedService {
    fn new(result: Result<BookingResponse, RentalError>) -> Self {
        Self { result, seen: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl RentalService for ScriptedService {
    async fn rent_bike(&self, request: &BookingRequest) -> Result<BookingResponse, RentalError> {
        self.seen.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

fn widget_with_june_1_to_3() -> BookingOverview {
    let mut widget =
        BookingOverview::for_bike(bike(), PricingEngine::default(), june(1)).with_user_id(42);
    assert!(widget.handle_date_click(june(1), june(1)));
    assert!(widget.handle_date_click(june(3), june(1)));
    widget
}

#[tokio::test]
async fn test_successful_booking_flow() {
    let mut widget = widget_with_june_1_to_3();
    assert_eq!(widget.pricing().total, 66.0);
    assert_eq!(widget.submission_state(), &SubmissionState::Idle);

    let ticket = widget.begin_submit().unwrap();
    assert_eq!(widget.submission_state(), &SubmissionState::Submitting);
    assert!(widget.booking_error().is_none());
    assert_eq!(
        ticket.request(),
        &BookingRequest {
            bike_id: 7,
            user_id: 42,
            date_from: "2024-06-01".to_string(),
            date_to: "2024-06-03".to_string(),
        }
    );

    let service = LocalRentalService::new(PricingEngine::default()).with_bike(bike());
    let result = service.rent_bike(ticket.request()).await;
    assert!(widget.complete_submit(ticket, result));

    let details = BookingResponse { rent_amount: 60.0, fee: 6.0, total_amount: 66.0 };
    assert_eq!(widget.submission_state(), &SubmissionState::Succeeded { details });
    assert!(widget.booking_error().is_none());
}

#[tokio::test]
async fn test_conflict_is_shown_verbatim_and_submit_re_enabled() {
    let mut widget = widget_with_june_1_to_3();
    let service = ScriptedService::new(Err(RentalError::Rejected(BookingErrorPayload::new(
        "Conflict",
        "Bike unavailable",
    ))));

    assert!(widget.submit(&service).await);

    assert_eq!(
        widget.submission_state(),
        &SubmissionState::Failed { message: "Bike unavailable".to_string() }
    );
    assert!(widget.can_submit());
    assert!(widget.snapshot(june(1)).button.enabled);
}

#[tokio::test]
async fn test_unstructured_failure_uses_generic_message() {
    let mut widget = widget_with_june_1_to_3();
    let refused = RentalError::Transport("connection refused".to_string());
    let service = ScriptedService::new(Err(refused));

    widget.submit(&service).await;
    assert_eq!(widget.booking_error(), Some("Failed to book bike. Please try again."));

    // retrying clears the old error before the answer comes back
    let ticket = widget.begin_submit().unwrap();
    assert!(widget.booking_error().is_none());
    widget.complete_submit(ticket, Ok(three_days()));
    assert!(widget.booking_error().is_none());
}

#[tokio::test]
async fn test_submit_without_complete_range_does_nothing() {
    let mut widget = BookingOverview::for_bike(bike(), PricingEngine::default(), june(1));
    widget.handle_date_click(june(4), june(1));

    let nothing = BookingResponse { rent_amount: 0.0, fee: 0.0, total_amount: 0.0 };
    let service = ScriptedService::new(Ok(nothing));
    assert!(!widget.submit(&service).await);

    assert!(service.seen.lock().unwrap().is_empty());
    assert_eq!(widget.submission_state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn test_widget_stays_interactive_while_submitting() {
    let mut widget = widget_with_june_1_to_3();
    let ticket = widget.begin_submit().unwrap();

    // second submit is refused while the first is pending
    assert!(widget.begin_submit().is_none());
    assert!(!widget.snapshot(june(1)).button.enabled);

    widget.show_next_month();
    widget.handle_date_click(june(10), june(1));
    assert_eq!(widget.range(), DateRange::starting(june(10)));
    assert!(widget.is_submitting());

    widget.complete_submit(ticket, Ok(three_days()));
    assert!(!widget.is_submitting());
}

#[tokio::test]
async fn test_response_after_dismiss_is_ignored() {
    let mut widget = widget_with_june_1_to_3();
    let ticket = widget.begin_submit().unwrap();

    widget.dismiss();
    let applied = widget.complete_submit(
        ticket,
        Ok(BookingResponse { rent_amount: 60.0, fee: 6.0, total_amount: 66.0 }),
    );

    assert!(!applied);
    assert_eq!(widget.submission_state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn test_cancelled_submit_does_not_leave_widget_submitting() {
    let mut widget = widget_with_june_1_to_3();
    let service = LocalRentalService::new(PricingEngine::default())
        .with_bike(bike())
        .with_latency(Duration::from_secs(30));

    let outcome = tokio::time::timeout(Duration::from_millis(20), widget.submit(&service)).await;
    assert!(outcome.is_err());

    assert_eq!(widget.submission_state(), &SubmissionState::Idle);
    assert!(widget.can_submit());
    assert_eq!(service.reservation_count().await, 0);
}

#[tokio::test]
async fn test_second_booking_of_same_dates_conflicts() {
    let service = LocalRentalService::new(PricingEngine::default()).with_bike(bike());

    let mut first = widget_with_june_1_to_3();
    assert!(first.submit(&service).await);
    assert!(matches!(first.submission_state(), SubmissionState::Succeeded { .. }));

    let mut second = widget_with_june_1_to_3();
    second.submit(&service).await;
    assert_eq!(second.booking_error(), Some("Bike unavailable"));
}

#[test]
fn test_range_observer_sees_every_transition() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let mut widget = BookingOverview::for_bike(bike(), PricingEngine::default(), june(1))
        .on_range_change(move |range| sink.lock().unwrap().push(*range));

    widget.handle_date_click(june(10), june(1));
    widget.handle_date_click(june(5), june(1));
    widget.handle_date_click(june(20), june(1));
    widget.clear_dates();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            DateRange::starting(june(10)),
            DateRange::between(june(5), june(10)),
            DateRange::starting(june(20)),
            DateRange::EMPTY,
        ]
    );
}
