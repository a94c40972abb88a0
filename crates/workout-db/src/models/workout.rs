//! Workout and workout day models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for workouts table
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutModel {
    pub id: i64,
    pub student_id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for workout_days table
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutDayModel {
    pub id: i64,
    pub workout_id: i64,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i16,
}
