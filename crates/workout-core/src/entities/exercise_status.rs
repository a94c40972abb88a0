//! Exercise status entity - a dated completion record

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{CompletionStatus, ExerciseId, ExerciseStatusId, UserId};

/// One student's outcome for one exercise on one calendar date
///
/// Unique per `(exercise_id, student_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseStatus {
    pub id: ExerciseStatusId,
    pub exercise_id: ExerciseId,
    pub student_id: UserId,
    pub date: NaiveDate,
    pub status: CompletionStatus,
    pub recorded_at: DateTime<Utc>,
}

impl ExerciseStatus {
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == CompletionStatus::Completed
    }

    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.status == CompletionStatus::Skipped
    }
}

/// Outcome to record; replaces any status with the same triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExerciseStatus {
    pub exercise_id: ExerciseId,
    pub student_id: UserId,
    pub date: NaiveDate,
    pub status: CompletionStatus,
}
