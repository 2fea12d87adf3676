pub mod calendar;
pub mod range;
pub mod selection;
pub mod picker;

pub use range::DateRange;
pub use selection::{RangeSelection, SelectionState};
pub use picker::{DateRangePicker, DayCell, PickerVariant};
