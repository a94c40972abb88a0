//! Instructor-level engagement report

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::rate::{completion_rate, Trend};
use super::window::{DateWindow, ReportWindows};
use crate::entities::{Connection, ExerciseStatus, Workout};
use crate::value_objects::UserId;

/// Student enrollment counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StudentCounts {
    pub total: usize,
    pub new_this_week: usize,
    pub new_this_month: usize,
    pub new_previous_month: usize,
    /// Students with an active workout
    pub active: usize,
}

/// Workout creation counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkoutCounts {
    pub total: usize,
    pub this_week: usize,
    pub this_month: usize,
    pub previous_month: usize,
}

/// Completion percentages per window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompletionRates {
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub previous_month: f64,
    pub overall: f64,
}

/// Month-over-month deltas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trends {
    pub students: Trend,
    pub completion_rate: Trend,
    pub workouts: Trend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructorStatistics {
    pub generated_at: DateTime<Utc>,
    pub students: StudentCounts,
    pub workouts: WorkoutCounts,
    pub completion: CompletionRates,
    pub trends: Trends,
}

/// Build the report for one instructor.
///
/// `connections` are the instructor's accepted records; `workouts` and
/// `statuses` may contain rows of other students, which are ignored.
pub fn compute_instructor_statistics(
    connections: &[Connection],
    workouts: &[Workout],
    statuses: &[ExerciseStatus],
    now: DateTime<Utc>,
) -> InstructorStatistics {
    let windows = ReportWindows::anchored_at(now);

    let accepted: Vec<&Connection> = connections.iter().filter(|c| c.is_accepted()).collect();
    let roster: HashSet<UserId> = accepted.iter().map(|c| c.student_id).collect();

    let workouts: Vec<&Workout> = workouts
        .iter()
        .filter(|w| roster.contains(&w.student_id))
        .collect();
    let statuses: Vec<&ExerciseStatus> = statuses
        .iter()
        .filter(|s| roster.contains(&s.student_id))
        .collect();

    let students = count_students(&accepted, &roster, &workouts, &windows);
    let workout_counts = count_workouts(&workouts, &windows);
    let completion = CompletionRates {
        today: rate_in(&statuses, Some(windows.today)),
        this_week: rate_in(&statuses, Some(windows.this_week)),
        this_month: rate_in(&statuses, Some(windows.this_month)),
        previous_month: rate_in(&statuses, Some(windows.previous_month)),
        overall: rate_in(&statuses, None),
    };

    let trends = Trends {
        students: Trend::of_counts(students.new_this_month, students.new_previous_month),
        completion_rate: Trend::between(completion.this_month, completion.previous_month),
        workouts: Trend::of_counts(workout_counts.this_month, workout_counts.previous_month),
    };

    InstructorStatistics {
        generated_at: now,
        students,
        workouts: workout_counts,
        completion,
        trends,
    }
}

fn count_students(
    accepted: &[&Connection],
    roster: &HashSet<UserId>,
    workouts: &[&Workout],
    windows: &ReportWindows,
) -> StudentCounts {
    let connected_in = |window: DateWindow| -> usize {
        accepted
            .iter()
            .filter(|c| c.connected_at.is_some_and(|at| window.contains(at)))
            .map(|c| c.student_id)
            .collect::<HashSet<_>>()
            .len()
    };

    let active = workouts
        .iter()
        .filter(|w| w.is_active)
        .map(|w| w.student_id)
        .collect::<HashSet<_>>()
        .len();

    StudentCounts {
        total: roster.len(),
        new_this_week: connected_in(windows.this_week),
        new_this_month: connected_in(windows.this_month),
        new_previous_month: connected_in(windows.previous_month),
        active,
    }
}

fn count_workouts(workouts: &[&Workout], windows: &ReportWindows) -> WorkoutCounts {
    let created_in =
        |window: DateWindow| workouts.iter().filter(|w| window.contains(w.created_at)).count();

    WorkoutCounts {
        total: workouts.len(),
        this_week: created_in(windows.this_week),
        this_month: created_in(windows.this_month),
        previous_month: created_in(windows.previous_month),
    }
}

fn rate_in(statuses: &[&ExerciseStatus], window: Option<DateWindow>) -> f64 {
    let in_window: Vec<&&ExerciseStatus> = statuses
        .iter()
        .filter(|s| match window {
            Some(w) => w.contains_date(s.date),
            None => true,
        })
        .collect();
    let completed = in_window.iter().filter(|s| s.is_completed()).count();
    completion_rate(completed, in_window.len())
}
