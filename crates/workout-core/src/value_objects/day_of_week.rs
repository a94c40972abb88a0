//! Day-of-week numbering shared by storage and reporting
//!
//! Days are numbered 0 = Sunday through 6 = Saturday, and weeks start on Sunday.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Storage number of a weekday (0 = Sunday)
#[inline]
pub fn weekday_to_number(day: Weekday) -> i16 {
    day.num_days_from_sunday() as i16
}

/// Weekday for a storage number, `None` outside 0..=6
pub fn weekday_from_number(n: i16) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Sunday on or before `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
