//! Test fixtures and data generators
//!
//! Request bodies and the subset of response fields the tests read.

use serde::{Deserialize, Serialize};

/// Unique suffix so repeated runs against one database never collide
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl RegisterRequest {
    pub fn instructor() -> Self {
        Self::unique("instructor", None)
    }

    pub fn student() -> Self {
        Self::unique("student", Some(27))
    }

    fn unique(role: &'static str, age: Option<i32>) -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test {role} {suffix}"),
            email: format!("{role}.{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            role,
            age,
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub age: Option<i32>,
}

/// Invitation record
#[derive(Debug, Deserialize)]
pub struct InvitationResponse {
    pub id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub status: String,
    pub connected_at: Option<String>,
}

/// Pending invitation as seen by the student
#[derive(Debug, Deserialize)]
pub struct PendingInvitationResponse {
    pub id: i64,
    pub instructor: InstructorSummaryResponse,
}

/// Instructor card
#[derive(Debug, Deserialize)]
pub struct InstructorSummaryResponse {
    pub id: i64,
    pub name: String,
    pub students_count: i64,
}

/// Current trainer lookup
#[derive(Debug, Deserialize)]
pub struct CurrentTrainerResponse {
    pub has_trainer: bool,
    pub trainer: Option<InstructorSummaryResponse>,
}

/// Roster entry
#[derive(Debug, Deserialize)]
pub struct StudentSummaryResponse {
    pub id: i64,
    pub active_workout_id: i64,
    pub active_workout_name: String,
    pub completed_exercises_today: usize,
    pub total_exercises_today: usize,
}

/// Workout with its days
#[derive(Debug, Deserialize)]
pub struct WorkoutDetailResponse {
    pub id: i64,
    pub student_id: i64,
    pub name: String,
    pub is_active: bool,
    pub days: Vec<WorkoutDayResponse>,
}

/// Workout list entry
#[derive(Debug, Deserialize)]
pub struct WorkoutSummaryResponse {
    pub id: i64,
    pub is_active: bool,
    pub days_count: usize,
    pub exercises_count: usize,
}

/// Workout day
#[derive(Debug, Deserialize)]
pub struct WorkoutDayResponse {
    pub id: i64,
    pub day_of_week: i16,
    pub exercises: Vec<ExerciseResponse>,
}

/// Exercise
#[derive(Debug, Deserialize)]
pub struct ExerciseResponse {
    pub id: i64,
    pub name: String,
    pub order: i32,
}

/// New exercise body
#[derive(Debug, Serialize)]
pub struct AddExerciseRequest {
    pub exercise_db_id: String,
    pub name: String,
    pub sets: String,
    pub repetitions: String,
}

impl AddExerciseRequest {
    pub fn named(name: &str) -> Self {
        Self {
            exercise_db_id: format!("db-{name}"),
            name: name.to_string(),
            sets: "3".to_string(),
            repetitions: "12".to_string(),
        }
    }
}

/// Daily progress
#[derive(Debug, Deserialize)]
pub struct DailyStatsResponse {
    pub date: String,
    pub completed_exercises: usize,
    pub skipped_exercises: usize,
    pub total_exercises: usize,
    pub completion_rate: f64,
}

/// Weekly progress
#[derive(Debug, Deserialize)]
pub struct WeeklyStatsResponse {
    pub week_start_date: String,
    pub daily_stats: Vec<DailyStatsResponse>,
    pub total_exercises: usize,
}

/// Instructor dashboard, reduced to what the tests read
#[derive(Debug, Deserialize)]
pub struct InstructorStatisticsResponse {
    pub students: StudentStats,
    pub workouts: WorkoutStats,
}

#[derive(Debug, Deserialize)]
pub struct StudentStats {
    pub total: usize,
    pub active: usize,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutStats {
    pub total: usize,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
