use std::fmt;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};

/// Format the API expects for `StartDateTime` / `EndDateTime`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "now", so the reporting month can be pinned in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Inclusive first and last calendar day of a month, in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        // Day 1 exists for every month chrono can represent, and so does the
        // day before the first of the following month.
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(start);
        DateRange { start, end }
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date range: {} to {}", self.start_param(), self.end_param())
    }
}

/// First and last day of the current UTC month.
pub fn current_month_range(clock: &dyn Clock) -> DateRange {
    DateRange::containing(clock.now().date_naive())
}
