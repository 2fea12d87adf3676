//! The booking widget controller.
//!
//! [`BookingOverview`] is the only owner of widget state: the date picker,
//! the current price, the submission flow and the presentation flags. Views
//! never mutate it; they receive an [`OverviewSnapshot`] and render that.

use bikerent_calendar::{calendar, DateRange, DateRangePicker, DayCell, PickerVariant};
use bikerent_catalog::{PricingBreakdown, PricingEngine};
use bikerent_core::{RentalError, RentalService, DEFAULT_USER_ID};
use bikerent_shared::models::{Bike, BookingResponse};
use chrono::NaiveDate;
use serde::Serialize;

use crate::layout::LayoutKind;
use crate::models::{BookingConfirmation, ButtonState, SubmissionState};
use crate::submission::{BookingSubmission, InFlight, SubmissionTicket};

/// Default width below which the mobile layout is used
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 1200;

/// Immutable view of the widget handed to renderers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSnapshot {
    pub layout: LayoutKind,
    pub bike_name: Option<String>,
    pub bike_image: Option<String>,
    pub rate_by_day: f64,
    pub range: DateRange,
    pub range_text: Option<String>,
    pub month_label: String,
    pub weekdays: Vec<String>,
    pub cells: Vec<DayCell>,
    pub pricing: PricingBreakdown,
    pub is_booking_ready: bool,
    pub is_booking: bool,
    pub booking_error: Option<String>,
    pub confirmation: Option<BookingConfirmation>,
    pub mobile_sheet_open: bool,
    pub date_drawer_open: bool,
    pub can_confirm_dates: bool,
    pub button: ButtonState,
}

pub struct BookingOverview {
    bike: Option<Bike>,
    rate_by_day: f64,
    user_id: i64,
    pricing: PricingEngine,
    picker: DateRangePicker,
    current_pricing: PricingBreakdown,
    submission: BookingSubmission,
    mobile_sheet_open: bool,
    viewport_width: u32,
    mobile_breakpoint: u32,
}

impl BookingOverview {
    /// Widget with no bike attached yet, showing the month of `today`
    pub fn new(rate_by_day: f64, pricing: PricingEngine, today: NaiveDate) -> Self {
        let current_pricing = pricing.idle_estimate(rate_by_day);
        Self {
            bike: None,
            rate_by_day,
            user_id: DEFAULT_USER_ID,
            pricing,
            picker: DateRangePicker::new(today),
            current_pricing,
            submission: BookingSubmission::new(),
            mobile_sheet_open: false,
            viewport_width: DEFAULT_MOBILE_BREAKPOINT,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
        }
    }

    pub fn for_bike(bike: Bike, pricing: PricingEngine, today: NaiveDate) -> Self {
        Self::new(bike.rate, pricing, today).with_bike(bike)
    }

    pub fn with_bike(mut self, bike: Bike) -> Self {
        self.bike = Some(bike);
        self
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_viewport(mut self, width: u32, mobile_breakpoint: u32) -> Self {
        self.mobile_breakpoint = mobile_breakpoint;
        self.resize(width);
        self
    }

    /// Extra observer, called with every new range
    pub fn on_range_change(mut self, listener: impl FnMut(&DateRange) + Send + 'static) -> Self {
        self.picker = self.picker.on_change(listener);
        self
    }

    pub fn bike(&self) -> Option<&Bike> {
        self.bike.as_ref()
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn range(&self) -> DateRange {
        self.picker.range()
    }

    pub fn pricing(&self) -> &PricingBreakdown {
        &self.current_pricing
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.submission.state()
    }

    pub fn booking_error(&self) -> Option<&str> {
        self.submission.error()
    }

    pub fn picker(&self) -> &DateRangePicker {
        &self.picker
    }

    pub fn is_booking_ready(&self) -> bool {
        self.range().is_complete()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    pub fn can_submit(&self) -> bool {
        self.is_booking_ready() && !self.is_submitting() && self.bike.is_some()
    }

    pub fn layout(&self) -> LayoutKind {
        LayoutKind::for_width(self.viewport_width, self.mobile_breakpoint)
    }

    // Date selection

    /// Returns `false` when the click was rejected by the picker
    pub fn handle_date_click(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.picker.click(date, today) {
            Some(range) => {
                self.apply_range(range);
                true
            }
            None => false,
        }
    }

    pub fn clear_dates(&mut self) {
        if let Some(range) = self.picker.clear() {
            self.apply_range(range);
        }
    }

    pub fn show_previous_month(&mut self) {
        self.picker.show_previous_month();
    }

    pub fn show_next_month(&mut self) {
        self.picker.show_next_month();
    }

    pub fn open_date_drawer(&mut self) {
        self.picker.open_drawer();
    }

    pub fn close_date_drawer(&mut self) {
        self.picker.close_drawer();
    }

    pub fn confirm_dates(&mut self) -> bool {
        self.picker.confirm()
    }

    // Error first, then price: a new selection never shows a stale error
    // next to a fresh total.
    fn apply_range(&mut self, range: DateRange) {
        self.submission.clear_error();
        self.current_pricing = if range.is_complete() {
            self.pricing.calculate(&range, self.rate_by_day)
        } else {
            self.pricing.idle_estimate(self.rate_by_day)
        };
        tracing::debug!(
            ?range,
            days = self.current_pricing.number_of_days,
            total = self.current_pricing.total,
            "Pricing updated"
        );
    }

    // Booking

    /// Start a submission; `None` when not ready or already submitting
    pub fn begin_submit(&mut self) -> Option<SubmissionTicket> {
        let range = self.range();
        self.submission.begin(self.bike.as_ref(), &range, self.user_id)
    }

    /// Apply the service's answer to a started submission
    pub fn complete_submit(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<BookingResponse, RentalError>,
    ) -> bool {
        let applied = self.submission.complete(ticket, result);
        if applied {
            self.after_submit();
        }
        applied
    }

    /// Submit the current selection and wait for the outcome
    pub async fn submit(&mut self, service: &dyn RentalService) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let request = ticket.request().clone();

        let applied = {
            let in_flight = InFlight::new(&mut self.submission, ticket);
            let result = service.rent_bike(&request).await;
            in_flight.finish(result)
        };
        if applied {
            self.after_submit();
        }
        applied
    }

    fn after_submit(&mut self) {
        if self.submission.details().is_some() {
            self.mobile_sheet_open = false;
        }
    }

    /// Close the success screen
    pub fn close_confirmation(&mut self) {
        self.submission.acknowledge();
    }

    /// The widget is going away; any answer still on its way is ignored
    pub fn dismiss(&mut self) {
        self.submission.abandon();
        self.mobile_sheet_open = false;
    }

    // Presentation

    pub fn open_mobile_sheet(&mut self) {
        self.mobile_sheet_open = true;
    }

    pub fn close_mobile_sheet(&mut self) {
        self.mobile_sheet_open = false;
    }

    pub fn is_mobile_sheet_open(&self) -> bool {
        self.mobile_sheet_open
    }

    pub fn resize(&mut self, width: u32) {
        let before = self.layout();
        self.viewport_width = width;
        let after = self.layout();

        if before != after {
            tracing::debug!(width, layout = ?after, "Layout switched");
        }
        self.picker.set_variant(match after {
            LayoutKind::Desktop => PickerVariant::Calendar,
            LayoutKind::Mobile => PickerVariant::Input,
        });
    }

    pub fn snapshot(&self, today: NaiveDate) -> OverviewSnapshot {
        let range = self.range();
        let confirmation = self.submission.details().map(|details| BookingConfirmation {
            bike: self.bike.clone(),
            details: *details,
        });

        OverviewSnapshot {
            layout: self.layout(),
            bike_name: self.bike.as_ref().map(|bike| bike.name.clone()),
            bike_image: self
                .bike
                .as_ref()
                .and_then(Bike::primary_image)
                .map(str::to_string),
            rate_by_day: self.rate_by_day,
            range,
            range_text: self.picker.input_text(),
            month_label: self.picker.month_label(),
            weekdays: calendar::weekdays().to_vec(),
            cells: self.picker.cells(today),
            pricing: self.current_pricing,
            is_booking_ready: self.is_booking_ready(),
            is_booking: self.is_submitting(),
            booking_error: self.booking_error().map(str::to_string),
            confirmation,
            mobile_sheet_open: self.mobile_sheet_open,
            date_drawer_open: self.picker.is_drawer_open(),
            can_confirm_dates: self.picker.can_confirm(),
            button: ButtonState::new(
                self.is_booking_ready(),
                self.is_submitting(),
                self.can_submit(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikerent_shared::models::BookingErrorPayload;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn overview() -> BookingOverview {
        let bike = Bike::new(7, "Cannondale", 20.0);
        BookingOverview::for_bike(bike, PricingEngine::default(), june(1))
    }

    #[test]
    fn test_initial_pricing_is_one_day_estimate() {
        let widget = overview();
        let pricing = widget.pricing();

        assert_eq!(pricing.number_of_days, 1);
        assert_eq!(pricing.subtotal, 20.0);
        assert_eq!(pricing.service_fee, 2.0);
        assert_eq!(pricing.total, 22.0);
        assert!(!widget.is_booking_ready());
    }

    #[test]
    fn test_pricing_follows_selection() {
        let mut widget = overview();

        widget.handle_date_click(june(1), june(1));
        assert_eq!(widget.pricing().number_of_days, 1);
        assert_eq!(widget.pricing().total, 22.0);

        widget.handle_date_click(june(3), june(1));
        assert_eq!(widget.pricing().number_of_days, 3);
        assert_eq!(widget.pricing().subtotal, 60.0);
        assert_eq!(widget.pricing().service_fee, 6.0);
        assert_eq!(widget.pricing().total, 66.0);

        widget.clear_dates();
        assert_eq!(widget.pricing().total, 22.0);
        assert!(widget.range().is_empty());
    }

    #[test]
    fn test_rejected_click_keeps_state() {
        let mut widget = overview();
        assert!(!widget.handle_date_click(june(1), june(2)));
        assert!(widget.range().is_empty());
    }

    #[test]
    fn test_new_selection_clears_error() {
        let mut widget = overview();
        widget.handle_date_click(june(1), june(1));
        widget.handle_date_click(june(3), june(1));

        let ticket = widget.begin_submit().unwrap();
        widget.complete_submit(
            ticket,
            Err(RentalError::Rejected(BookingErrorPayload::new("Conflict", "Bike unavailable"))),
        );
        assert_eq!(widget.booking_error(), Some("Bike unavailable"));

        widget.handle_date_click(june(5), june(1));
        assert!(widget.booking_error().is_none());
        assert_eq!(widget.submission_state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_success_closes_mobile_sheet() {
        let mut widget = overview().with_viewport(800, DEFAULT_MOBILE_BREAKPOINT);
        assert_eq!(widget.layout(), LayoutKind::Mobile);

        widget.open_mobile_sheet();
        assert!(!widget.handle_date_click(june(1), june(1)));

        widget.open_date_drawer();
        assert!(widget.handle_date_click(june(1), june(1)));
        widget.handle_date_click(june(3), june(1));
        assert!(widget.confirm_dates());

        let ticket = widget.begin_submit().unwrap();
        let details = BookingResponse { rent_amount: 60.0, fee: 6.0, total_amount: 66.0 };
        assert!(widget.complete_submit(ticket, Ok(details)));
        assert!(!widget.is_mobile_sheet_open());

        let snapshot = widget.snapshot(june(1));
        assert_eq!(snapshot.confirmation.unwrap().details, details);

        widget.close_confirmation();
        assert_eq!(widget.submission_state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_button_states() {
        let mut widget = overview();
        let button = |widget: &BookingOverview| widget.snapshot(june(1)).button;
        let waiting = ButtonState { label: "Select dates to continue", enabled: false };
        assert_eq!(button(&widget), waiting);

        widget.handle_date_click(june(1), june(1));
        widget.handle_date_click(june(2), june(1));
        assert_eq!(button(&widget), ButtonState { label: "Add to booking", enabled: true });

        let _ticket = widget.begin_submit().unwrap();
        assert_eq!(button(&widget), ButtonState { label: "Booking...", enabled: false });
    }

    #[test]
    fn test_without_bike_button_stays_disabled() {
        let mut widget = BookingOverview::new(20.0, PricingEngine::default(), june(1));
        widget.handle_date_click(june(1), june(1));
        widget.handle_date_click(june(2), june(1));

        assert!(widget.is_booking_ready());
        assert!(!widget.can_submit());
        assert!(widget.begin_submit().is_none());
    }

    #[test]
    fn test_resize_switches_picker_variant() {
        let mut widget = overview();
        assert_eq!(widget.picker().variant(), PickerVariant::Calendar);

        widget.resize(600);
        assert_eq!(widget.layout(), LayoutKind::Mobile);
        assert_eq!(widget.picker().variant(), PickerVariant::Input);

        widget.resize(1440);
        assert_eq!(widget.picker().variant(), PickerVariant::Calendar);
    }
}
