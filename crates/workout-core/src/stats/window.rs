//! Reporting windows anchored at a point in time
//!
//! All windows are half-open `[start, end)` over UTC calendar dates.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};

use crate::value_objects::start_of_week;

/// Half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the window
    #[inline]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Whether the instant falls inside the window
    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.contains_date(at.date_naive())
    }

    /// Midnight UTC of the first day
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Midnight UTC after the last day
    pub fn end_instant(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Every window the instructor report needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    pub today: DateWindow,
    pub this_week: DateWindow,
    pub this_month: DateWindow,
    pub previous_month: DateWindow,
}

impl ReportWindows {
    /// Windows around `now`; the week starts on Sunday
    pub fn anchored_at(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let week_start = start_of_week(today);
        let month_start = today - Duration::days(i64::from(today.day0()));
        let next_month_start = month_start + Months::new(1);
        let previous_month_start = month_start - Months::new(1);

        Self {
            today: DateWindow::new(today, today + Duration::days(1)),
            this_week: DateWindow::new(week_start, week_start + Duration::days(7)),
            this_month: DateWindow::new(month_start, next_month_start),
            previous_month: DateWindow::new(previous_month_start, month_start),
        }
    }
}
