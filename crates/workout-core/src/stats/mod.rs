//! Reporting math - windows, completion rates, trends
//!
//! Everything here is pure: callers load rows and pass an explicit anchor.

mod instructor;
mod progress;
mod rate;
mod window;

pub use instructor::{
    compute_instructor_statistics, CompletionRates, InstructorStatistics, StudentCounts, Trends,
    WorkoutCounts,
};
pub use progress::{week_end_exclusive, DailyProgress, WeeklyProgress, DAYS_PER_WEEK};
pub use rate::{completion_rate, round2, Trend};
pub use window::{DateWindow, ReportWindows};
