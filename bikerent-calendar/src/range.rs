use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A possibly partial span of rental days.
///
/// When both ends are set, `start_date <= end_date` always holds; the only
/// way to build a complete range is [`DateRange::between`], which orders
/// its arguments. Deserialization goes through the same constructors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDateRange")]
pub struct DateRange {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDateRange {
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = &'static str;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        match (raw.start_date, raw.end_date) {
            (Some(start), Some(end)) => Ok(DateRange::between(start, end)),
            (Some(start), None) => Ok(DateRange::starting(start)),
            (None, None) => Ok(DateRange::EMPTY),
            (None, Some(_)) => Err("date range has an end date but no start date"),
        }
    }
}

impl DateRange {
    pub const EMPTY: DateRange = DateRange { start_date: None, end_date: None };

    /// Start picked, end still open
    pub fn starting(start: NaiveDate) -> Self {
        Self { start_date: Some(start), end_date: None }
    }

    /// Complete range, endpoints swapped if given out of order
    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        let (start, end) = if b < a { (b, a) } else { (a, b) };
        Self { start_date: Some(start), end_date: Some(end) }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// `(start, end)` of a complete range
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }

    pub fn is_start(&self, date: NaiveDate) -> bool {
        self.start_date == Some(date)
    }

    pub fn is_end(&self, date: NaiveDate) -> bool {
        self.end_date == Some(date)
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.is_start(date) || self.is_end(date)
    }

    /// Strictly between the endpoints of a complete range
    pub fn in_range(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => start < date && date < end,
            None => false,
        }
    }
}
