use bikerent_calendar::DateRange;
use bikerent_core::RentalError;
use bikerent_shared::models::{Bike, BookingRequest, BookingResponse};

use crate::models::SubmissionState;

/// Proof that a submission was started; hand it back to
/// [`BookingSubmission::complete`] together with the service's answer.
#[derive(Debug)]
pub struct SubmissionTicket {
    generation: u64,
    request: BookingRequest,
}

impl SubmissionTicket {
    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Manages the Idle → Submitting → Succeeded/Failed lifecycle.
///
/// Every started attempt gets a new generation number; responses carrying
/// an older generation are dropped, so an answer arriving after the widget
/// was dismissed cannot touch the current state.
#[derive(Debug)]
pub struct BookingSubmission {
    state: SubmissionState,
    generation: u64,
}

impl BookingSubmission {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&BookingResponse> {
        match &self.state {
            SubmissionState::Succeeded { details } => Some(details),
            _ => None,
        }
    }

    /// Transition: Idle/Failed/Succeeded → Submitting.
    ///
    /// Returns `None` without touching the state when the bike is unknown,
    /// the range is incomplete, or another attempt is still in flight.
    pub fn begin(
        &mut self,
        bike: Option<&Bike>,
        range: &DateRange,
        user_id: i64,
    ) -> Option<SubmissionTicket> {
        let (Some(bike), Some((date_from, date_to))) = (bike, range.bounds()) else {
            tracing::debug!("Booking not ready, ignoring submit");
            return None;
        };
        if self.is_submitting() {
            tracing::debug!(attempt = self.generation, "Booking already in flight");
            return None;
        }

        self.generation += 1;
        self.state = SubmissionState::Submitting;

        let request = BookingRequest::new(bike.id, user_id, date_from, date_to);
        tracing::debug!(attempt = self.generation, ?request, "Submitting booking");

        Some(SubmissionTicket {
            generation: self.generation,
            request,
        })
    }

    /// Transition: Submitting → Succeeded/Failed.
    ///
    /// Returns `false` if the ticket is stale and the result was discarded.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<BookingResponse, RentalError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.is_submitting() {
            tracing::warn!(
                attempt = ticket.generation,
                current = self.generation,
                "Discarding stale booking response"
            );
            return false;
        }

        self.state = match result {
            Ok(details) => {
                tracing::info!(
                    bike_id = ticket.request.bike_id,
                    total = details.total_amount,
                    "Booking confirmed"
                );
                SubmissionState::Succeeded { details }
            }
            Err(err) => {
                tracing::warn!(bike_id = ticket.request.bike_id, error = %err, "Booking failed");
                SubmissionState::Failed {
                    message: err.user_message(),
                }
            }
        };
        true
    }

    /// Failed → Idle; no effect in any other state
    pub fn clear_error(&mut self) {
        if matches!(self.state, SubmissionState::Failed { .. }) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Succeeded → Idle, once the confirmation was closed
    pub fn acknowledge(&mut self) {
        if matches!(self.state, SubmissionState::Succeeded { .. }) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Forget any attempt in flight; its response will be discarded
    pub fn abandon(&mut self) {
        self.generation += 1;
        if self.is_submitting() {
            tracing::info!(attempt = self.generation - 1, "Abandoning booking in flight");
            self.state = SubmissionState::Idle;
        }
    }
}

impl Default for BookingSubmission {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds a started attempt while the service call is awaited.
///
/// If the guard is dropped before [`InFlight::finish`] (the awaiting future
/// was cancelled), the attempt is abandoned so the flow never stays stuck
/// in `Submitting`.
pub struct InFlight<'a> {
    submission: &'a mut BookingSubmission,
    ticket: Option<SubmissionTicket>,
}

impl<'a> InFlight<'a> {
    pub fn new(submission: &'a mut BookingSubmission, ticket: SubmissionTicket) -> Self {
        Self {
            submission,
            ticket: Some(ticket),
        }
    }

    pub fn finish(mut self, result: Result<BookingResponse, RentalError>) -> bool {
        match self.ticket.take() {
            Some(ticket) => self.submission.complete(ticket, result),
            None => false,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            tracing::warn!(
                attempt = ticket.generation,
                "Booking attempt dropped before completion"
            );
            if ticket.generation == self.submission.generation {
                self.submission.abandon();
            }
        }
    }
}
