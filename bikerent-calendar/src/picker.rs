use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar;
use crate::range::DateRange;
use crate::selection::RangeSelection;

/// Placeholder shown by the input variant while nothing is picked
pub const INPUT_PLACEHOLDER: &str = "Select date range";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerVariant {
    /// Month grid rendered inline
    #[default]
    Calendar,
    /// Read-only text field that opens the grid in a drawer
    Input,
}

/// One square of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub label: String,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_selected: bool,
    pub in_range: bool,
    pub is_disabled: bool,
}

type RangeListener = Box<dyn FnMut(&DateRange) + Send>;

/// Month view plus the range selection behind it
pub struct DateRangePicker {
    current_month: NaiveDate,
    selection: RangeSelection,
    variant: PickerVariant,
    disabled: bool,
    drawer_open: bool,
    listener: Option<RangeListener>,
}

impl DateRangePicker {
    pub fn new(current_month: NaiveDate) -> Self {
        Self {
            current_month,
            selection: RangeSelection::new(),
            variant: PickerVariant::default(),
            disabled: false,
            drawer_open: false,
            listener: None,
        }
    }

    pub fn with_initial_range(mut self, range: DateRange) -> Self {
        self.selection = RangeSelection::with_initial(range);
        self
    }

    pub fn with_variant(mut self, variant: PickerVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Called with the new range after every click or clear
    pub fn on_change(mut self, listener: impl FnMut(&DateRange) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn variant(&self) -> PickerVariant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: PickerVariant) {
        if variant != PickerVariant::Input {
            self.drawer_open = false;
        }
        self.variant = variant;
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn range(&self) -> DateRange {
        self.selection.range()
    }

    /// Handle a click on a day. Returns the new range, or `None` when the
    /// click was rejected: picker disabled, grid hidden behind a closed
    /// drawer, or day in the past.
    pub fn click(&mut self, date: NaiveDate, today: NaiveDate) -> Option<DateRange> {
        if self.disabled {
            return None;
        }
        if self.variant == PickerVariant::Input && !self.drawer_open {
            tracing::debug!("Ignored click on {} while the date drawer is closed", date);
            return None;
        }
        if !calendar::is_selectable(date, today) {
            tracing::warn!("Rejected click on past date {}", date);
            return None;
        }

        let range = self.selection.select(date);
        self.notify(&range);
        Some(range)
    }

    pub fn clear(&mut self) -> Option<DateRange> {
        if self.disabled {
            return None;
        }

        let range = self.selection.clear();
        self.notify(&range);
        Some(range)
    }

    pub fn show_previous_month(&mut self) {
        if !self.disabled {
            self.current_month = calendar::previous_month(self.current_month);
        }
    }

    pub fn show_next_month(&mut self) {
        if !self.disabled {
            self.current_month = calendar::next_month(self.current_month);
        }
    }

    pub fn month_label(&self) -> String {
        calendar::format_month_year(self.current_month)
    }

    /// The grid for the displayed month
    pub fn cells(&self, today: NaiveDate) -> Vec<DayCell> {
        let range = self.range();

        calendar::calendar_days(self.current_month)
            .into_iter()
            .map(|date| {
                let is_past = calendar::is_past(date, today);
                DayCell {
                    date,
                    label: calendar::format_day(date),
                    in_current_month: calendar::is_same_month(date, self.current_month),
                    is_today: calendar::is_today(date, today),
                    is_past,
                    is_start: range.is_start(date),
                    is_end: range.is_end(date),
                    is_selected: range.is_selected(date),
                    in_range: range.in_range(date),
                    is_disabled: self.disabled || is_past,
                }
            })
            .collect()
    }

    // Input variant

    /// Field text, or `None` to show [`INPUT_PLACEHOLDER`]
    pub fn input_text(&self) -> Option<String> {
        let text = calendar::format_date_range(&self.range());
        (!text.is_empty()).then_some(text)
    }

    pub fn open_drawer(&mut self) {
        if !self.disabled && self.variant == PickerVariant::Input {
            self.drawer_open = true;
        }
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// The drawer's "Select" button only confirms a complete range
    pub fn can_confirm(&self) -> bool {
        self.range().is_complete()
    }

    pub fn confirm(&mut self) -> bool {
        if !self.can_confirm() {
            return false;
        }
        self.close_drawer();
        true
    }

    fn notify(&mut self, range: &DateRange) {
        tracing::debug!(?range, "Date range changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(range);
        }
    }
}
