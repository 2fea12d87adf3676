use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::range::DateRange;

/// Where the two-click selection currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionState {
    Empty,
    PendingEnd { start: NaiveDate },
    Complete { start: NaiveDate, end: NaiveDate },
}

impl SelectionState {
    pub fn from_range(range: DateRange) -> Self {
        match (range.start_date(), range.end_date()) {
            (Some(start), Some(end)) => SelectionState::Complete { start, end },
            (Some(start), None) => SelectionState::PendingEnd { start },
            _ => SelectionState::Empty,
        }
    }

    pub fn range(&self) -> DateRange {
        match *self {
            SelectionState::Empty => DateRange::EMPTY,
            SelectionState::PendingEnd { start } => DateRange::starting(start),
            SelectionState::Complete { start, end } => DateRange::between(start, end),
        }
    }

    /// Transition table for a click on `date`.
    ///
    /// | from       | to                                   |
    /// |------------|--------------------------------------|
    /// | Empty      | PendingEnd(date)                     |
    /// | PendingEnd | Complete(min(start, date), max(..))  |
    /// | Complete   | PendingEnd(date)                     |
    pub fn on_click(self, date: NaiveDate) -> Self {
        match self {
            SelectionState::Empty | SelectionState::Complete { .. } => {
                SelectionState::PendingEnd { start: date }
            }
            SelectionState::PendingEnd { start } if date < start => {
                SelectionState::Complete { start: date, end: start }
            }
            SelectionState::PendingEnd { start } => SelectionState::Complete { start, end: date },
        }
    }
}

/// Owns the selection and answers the rendering queries against it.
///
/// Callers must filter out non-selectable dates before calling
/// [`RangeSelection::select`]; the state machine accepts any date.
#[derive(Debug, Clone)]
pub struct RangeSelection {
    state: SelectionState,
}

impl RangeSelection {
    pub fn new() -> Self {
        Self { state: SelectionState::Empty }
    }

    pub fn with_initial(range: DateRange) -> Self {
        Self { state: SelectionState::from_range(range) }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn range(&self) -> DateRange {
        self.state.range()
    }

    /// Apply a click and return the resulting range
    pub fn select(&mut self, date: NaiveDate) -> DateRange {
        self.state = self.state.on_click(date);
        self.range()
    }

    /// Drop the selection, whatever state it was in
    pub fn clear(&mut self) -> DateRange {
        self.state = SelectionState::Empty;
        DateRange::EMPTY
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.range().is_selected(date)
    }

    pub fn in_range(&self, date: NaiveDate) -> bool {
        self.range().in_range(date)
    }

    pub fn is_start(&self, date: NaiveDate) -> bool {
        self.range().is_start(date)
    }

    pub fn is_end(&self, date: NaiveDate) -> bool {
        self.range().is_end(date)
    }
}

impl Default for RangeSelection {
    fn default() -> Self {
        Self::new()
    }
}
