//! Per-student daily and weekly progress

use chrono::{Datelike, Days, NaiveDate};

use super::rate::completion_rate;
use crate::entities::{ExerciseStatus, WorkoutTree};

/// Outcome counts for one date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub completed: usize,
    pub skipped: usize,
    /// Exercises the active workout schedules for the weekday
    pub total: usize,
    pub completion_rate: f64,
}

impl DailyProgress {
    /// Count the statuses recorded on `date` against the exercises `plan`
    /// schedules for that weekday. No plan means nothing is scheduled.
    pub fn compute(date: NaiveDate, plan: Option<&WorkoutTree>, statuses: &[ExerciseStatus]) -> Self {
        let total = plan.map_or(0, |tree| tree.exercises_on(date.weekday()));
        let on_date = statuses.iter().filter(|s| s.date == date);
        let (completed, skipped) = on_date.fold((0, 0), |(c, s), status| {
            if status.is_completed() {
                (c + 1, s)
            } else {
                (c, s + 1)
            }
        });

        Self {
            date,
            completed,
            skipped,
            total,
            completion_rate: completion_rate(completed, total),
        }
    }
}

/// Seven consecutive days starting at `week_start`
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyProgress {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DailyProgress>,
    pub completed: usize,
    pub skipped: usize,
    pub total: usize,
    pub completion_rate: f64,
}

/// Days covered by one weekly report
pub const DAYS_PER_WEEK: u64 = 7;

/// First date after the week starting at `week_start`, `None` when the week
/// runs past the last representable date
pub fn week_end_exclusive(week_start: NaiveDate) -> Option<NaiveDate> {
    week_start.checked_add_days(Days::new(DAYS_PER_WEEK))
}

impl WeeklyProgress {
    /// `None` when the week does not fit in the calendar
    pub fn compute(
        week_start: NaiveDate,
        plan: Option<&WorkoutTree>,
        statuses: &[ExerciseStatus],
    ) -> Option<Self> {
        week_end_exclusive(week_start)?;

        let days: Vec<DailyProgress> = (0..DAYS_PER_WEEK)
            .map(|offset| {
                week_start
                    .checked_add_days(Days::new(offset))
                    .map(|date| DailyProgress::compute(date, plan, statuses))
            })
            .collect::<Option<_>>()?;
        let week_end = days.last()?.date;

        let completed = days.iter().map(|d| d.completed).sum();
        let skipped = days.iter().map(|d| d.skipped).sum();
        let total = days.iter().map(|d| d.total).sum();

        Some(Self {
            week_start,
            week_end,
            days,
            completed,
            skipped,
            total,
            completion_rate: completion_rate(completed, total),
        })
    }
}
