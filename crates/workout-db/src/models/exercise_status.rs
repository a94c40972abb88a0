//! Exercise status database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for exercise_statuses table
#[derive(Debug, Clone, FromRow)]
pub struct ExerciseStatusModel {
    pub id: i64,
    pub exercise_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    /// 'completed' or 'skipped'
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}
