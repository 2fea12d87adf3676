use std::sync::Arc;

use bikerent_core::{RentalError, RentalService};
use bikerent_order::{renderer_for, BookingOverview, SubmissionState, SubmissionTicket};
use bikerent_shared::models::BookingResponse;
use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::command::{Command, HELP};

type BookingOutcome = (SubmissionTicket, Result<BookingResponse, RentalError>);

const OUTCOME_BUFFER: usize = 4;

/// Drives one widget from line-based input.
///
/// Bookings run as their own task and report back over a channel, so the
/// widget keeps taking input while a request is in flight.
pub struct Session {
    widget: BookingOverview,
    service: Arc<dyn RentalService>,
    today: NaiveDate,
    outcome_tx: mpsc::Sender<BookingOutcome>,
    outcome_rx: mpsc::Receiver<BookingOutcome>,
    booking_task: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(widget: BookingOverview, service: Arc<dyn RentalService>, today: NaiveDate) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(OUTCOME_BUFFER);
        Self {
            widget,
            service,
            today,
            outcome_tx,
            outcome_rx,
            booking_task: None,
        }
    }

    pub fn widget(&self) -> &BookingOverview {
        &self.widget
    }

    /// Current widget, drawn with the layout for the viewport
    pub fn render(&self) -> String {
        let snapshot = self.widget.snapshot(self.today);
        renderer_for(snapshot.layout).render(&snapshot)
    }

    fn reply(&self, note: Option<String>) -> String {
        match note {
            Some(note) => format!("{}\n\n{}", note, self.render()),
            None => self.render(),
        }
    }

    /// Apply one command. Returns the text to print, or `None` to stop.
    ///
    /// `book` only starts the request; its answer arrives through
    /// [`Session::wait_for_booking`] or the [`Session::run`] loop.
    pub fn execute(&mut self, command: Command) -> anyhow::Result<Option<String>> {
        let note = match command {
            Command::Quit => {
                self.shutdown();
                return Ok(None);
            }
            Command::Help => return Ok(Some(HELP.to_string())),
            Command::Json => {
                let snapshot = self.widget.snapshot(self.today);
                return Ok(Some(serde_json::to_string_pretty(&snapshot)?));
            }
            Command::Click(date) => (!self.widget.handle_date_click(date, self.today))
                .then(|| format!("{} is not available", date)),
            Command::Clear => {
                self.widget.clear_dates();
                None
            }
            Command::PreviousMonth => {
                self.widget.show_previous_month();
                None
            }
            Command::NextMonth => {
                self.widget.show_next_month();
                None
            }
            Command::Resize(width) => {
                self.widget.resize(width);
                None
            }
            Command::OpenSheet => {
                self.widget.open_mobile_sheet();
                None
            }
            Command::CloseSheet => {
                self.widget.close_mobile_sheet();
                None
            }
            Command::OpenDates => {
                self.widget.open_date_drawer();
                None
            }
            Command::ConfirmDates => {
                (!self.widget.confirm_dates()).then(|| "Pick both dates first".to_string())
            }
            Command::Book => match self.widget.begin_submit() {
                Some(ticket) => {
                    self.spawn_booking(ticket);
                    None
                }
                None if self.widget.is_submitting() => {
                    Some("Booking already in progress".to_string())
                }
                None => Some("Select dates to continue".to_string()),
            },
            Command::CloseConfirmation => {
                self.widget.close_confirmation();
                None
            }
            Command::Show => None,
        };

        Ok(Some(self.reply(note)))
    }

    fn spawn_booking(&mut self, ticket: SubmissionTicket) {
        let service = Arc::clone(&self.service);
        let outcome_tx = self.outcome_tx.clone();

        self.booking_task = Some(tokio::spawn(async move {
            tracing::debug!(attempt = ticket.generation(), "Sending booking request");
            let result = service.rent_bike(ticket.request()).await;
            if outcome_tx.send((ticket, result)).await.is_err() {
                tracing::debug!("Session closed before the booking answer arrived");
            }
        }));
    }

    /// Feed a finished request back into the widget. `None` when the answer
    /// was stale and discarded.
    fn apply_outcome(&mut self, outcome: BookingOutcome) -> Option<String> {
        let (ticket, result) = outcome;
        if !self.widget.complete_submit(ticket, result) {
            return None;
        }
        self.booking_task = None;

        let note = match self.widget.submission_state() {
            SubmissionState::Succeeded { .. } => Some("Booking confirmed".to_string()),
            _ => None,
        };
        Some(self.reply(note))
    }

    /// Wait for the booking in flight to finish and return the new render.
    /// `None` when nothing is being booked.
    pub async fn wait_for_booking(&mut self) -> Option<String> {
        while self.widget.is_submitting() {
            let outcome = self.outcome_rx.recv().await?;
            if let Some(reply) = self.apply_outcome(outcome) {
                return Some(reply);
            }
        }
        None
    }

    /// Stop any request in flight and drop the widget's pending state
    fn shutdown(&mut self) {
        if let Some(task) = self.booking_task.take() {
            task.abort();
        }
        self.widget.dismiss();
    }

    /// Read commands until `quit` or end of input. At end of input a
    /// booking still in flight is waited for before returning.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(format!("{}\n", self.render()).as_bytes()).await?;

        let mut lines = input.lines();
        let mut input_open = true;
        loop {
            if !input_open && !self.widget.is_submitting() {
                break;
            }

            let reply = tokio::select! {
                line = lines.next_line(), if input_open => match line? {
                    Some(line) => match line.parse::<Command>() {
                        Ok(command) => match self.execute(command)? {
                            Some(reply) => reply,
                            None => break,
                        },
                        Err(err) => {
                            tracing::debug!(error = %err, "Unparsable input");
                            format!("{}\n{}", err, HELP)
                        }
                    },
                    None => {
                        input_open = false;
                        continue;
                    }
                },
                Some(outcome) = self.outcome_rx.recv() => match self.apply_outcome(outcome) {
                    Some(reply) => reply,
                    None => continue,
                },
                else => break,
            };
            output.write_all(format!("\n{}\n", reply).as_bytes()).await?;
            output.flush().await?;
        }

        self.shutdown();
        Ok(())
    }
}
