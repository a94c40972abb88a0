//! Exercise database model

use sqlx::FromRow;

/// Database model for exercises table
#[derive(Debug, Clone, FromRow)]
pub struct ExerciseModel {
    pub id: i64,
    pub workout_day_id: i64,
    pub exercise_db_id: String,
    pub name: String,
    pub body_part: String,
    pub equipment: String,
    pub gif_url: String,
    pub sets: String,
    pub repetitions: String,
    pub weight: Option<f64>,
    pub rest_seconds: Option<i32>,
    pub order: i32,
    pub notes: Option<String>,
}
