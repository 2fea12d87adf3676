//! Month grids, navigation and display strings for the date picker.
//!
//! Everything here is a pure function of its arguments. "Today" is always
//! passed in by the caller; [`today`] reads the local clock for callers that
//! want the real date.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, Weekday};

use crate::range::DateRange;

/// Grid rows start on this day
pub const WEEK_START: Weekday = Weekday::Sun;

/// Sunday 2023-01-01, the week the header labels are taken from
const REFERENCE_WEEK: (i32, u32, u32) = (2023, 1, 1);

static WEEKDAYS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let (year, month, day) = REFERENCE_WEEK;
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|sunday| {
            sunday
                .iter_days()
                .take(7)
                .map(|date| date.format("%a").to_string())
                .collect()
        })
        .unwrap_or_default()
});

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `date` moved by `days`, saturating at the ends of the representable range
fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let bound = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    date.checked_add_signed(Duration::days(days)).unwrap_or(bound)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    shift_days(date, -i64::from(date.day0()))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset =
        (7 + date.weekday().num_days_from_monday() - WEEK_START.num_days_from_monday()) % 7;
    shift_days(date, -i64::from(offset))
}

pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    shift_days(start_of_week(date), 6)
}

/// Every day shown for `month`: whole weeks from the one holding the 1st
/// through the one holding the last day. Always a multiple of 7 long,
/// except where the grid is cut off at the last representable date.
pub fn calendar_days(month: NaiveDate) -> Vec<NaiveDate> {
    let first = start_of_week(start_of_month(month));
    let last = end_of_week(end_of_month(month));

    (0..=(last - first).num_days())
        .filter_map(|offset| first.checked_add_signed(Duration::days(offset)))
        .collect()
}

/// Same day one month earlier, clamped to the month's last day
pub fn previous_month(month: NaiveDate) -> NaiveDate {
    month.checked_sub_months(Months::new(1)).unwrap_or(NaiveDate::MIN)
}

/// Same day one month later, clamped to the month's last day
pub fn next_month(month: NaiveDate) -> NaiveDate {
    month.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX)
}

pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    !is_past(date, today)
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

pub fn is_same_month(date: NaiveDate, month: NaiveDate) -> bool {
    date.year() == month.year() && date.month() == month.month()
}

/// "June 2024"
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Day of month without padding: "5"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d").to_string()
}

/// Column headers, Sunday first: "Sun" .. "Sat"
pub fn weekdays() -> &'static [String] {
    &WEEKDAYS
}

/// `yyyy-MM-dd`
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}

fn format_long(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Text for the read-only range input
pub fn format_date_range(range: &DateRange) -> String {
    match (range.start_date(), range.end_date()) {
        (Some(start), Some(end)) => {
            format!("From {} to {}", format_long(start), format_long(end))
        }
        (Some(start), None) => format!("From {} - Select end date", format_long(start)),
        _ => String::new(),
    }
}
