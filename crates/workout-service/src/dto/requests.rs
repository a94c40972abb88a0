//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};
use workout_core::{CompletionStatus, ExerciseId, Gender, UserId, UserRole};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    pub role: UserRole,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,

    pub gender: Option<Gender>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
///
/// Changing the password requires `current_password`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,

    pub gender: Option<Gender>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub current_password: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: Option<String>,
}

/// Student body metrics and goals
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStudentProfileRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    pub gender: Gender,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,

    /// Centimeters
    #[validate(range(min = 0.0, max = 300.0, message = "Height must be between 0 and 300"))]
    pub height: Option<f64>,

    /// Kilograms
    #[validate(range(min = 0.0, max = 500.0, message = "Weight must be between 0 and 500"))]
    pub weight: Option<f64>,

    #[validate(length(max = 100))]
    pub body_type: Option<String>,

    #[validate(length(max = 2000))]
    pub health_conditions: Option<String>,

    #[validate(length(max = 500))]
    pub goal: Option<String>,

    #[validate(length(max = 2000))]
    pub observations: Option<String>,
}

/// Instructor credentials and contact data
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInstructorProfileRequest {
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 2000))]
    pub certifications: Option<String>,

    #[validate(length(max = 2000))]
    pub specializations: Option<String>,

    #[validate(length(max = 4000))]
    pub bio: Option<String>,

    #[validate(range(min = 0, max = 80, message = "Years of experience must be between 0 and 80"))]
    pub years_of_experience: Option<i32>,

    /// Opaque JSON document with social profile links
    #[validate(custom(function = "validate_json_document"))]
    pub social_links_json: Option<String>,
}

/// User search query string
#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersQuery {
    #[serde(default)]
    pub q: String,
}

// ============================================================================
// Invitation Requests
// ============================================================================

/// Invite a student by id or by email; the id wins when both are given
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InviteStudentRequest {
    pub student_id: Option<UserId>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

// ============================================================================
// Workout Requests
// ============================================================================

/// Create workout request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    pub student_id: UserId,

    #[validate(length(min = 1, max = 100, message = "Workout name must be 1-100 characters"))]
    pub name: String,
}

/// Update workout request; a blank name is ignored
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[validate(length(max = 100, message = "Workout name must be at most 100 characters"))]
    pub name: Option<String>,

    pub is_active: Option<bool>,
}

/// Add a weekday to a workout
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddWorkoutDayRequest {
    /// 0 = Sunday .. 6 = Saturday
    #[validate(range(min = 0, max = 6, message = "Day of week must be between 0 and 6"))]
    pub day_of_week: i16,
}

/// Append an exercise to a workout day
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddExerciseRequest {
    #[validate(length(min = 1, max = 50, message = "Exercise catalog id must be 1-50 characters"))]
    pub exercise_db_id: String,

    #[validate(length(min = 1, max = 200, message = "Exercise name must be 1-200 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub body_part: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub equipment: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub gif_url: String,

    #[validate(length(min = 1, max = 20, message = "Sets must be 1-20 characters"))]
    pub sets: String,

    #[validate(length(min = 1, max = 20, message = "Repetitions must be 1-20 characters"))]
    pub repetitions: String,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: Option<f64>,

    #[validate(range(min = 0, message = "Rest cannot be negative"))]
    pub rest_seconds: Option<i32>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Partial prescription update; blank sets/repetitions are ignored
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExerciseRequest {
    #[validate(length(max = 20))]
    pub sets: Option<String>,

    #[validate(length(max = 20))]
    pub repetitions: Option<String>,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: Option<f64>,

    #[validate(range(min = 0, message = "Rest cannot be negative"))]
    pub rest_seconds: Option<i32>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// New order of a day's exercises
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderExercisesRequest {
    #[validate(length(max = 200, message = "At most 200 exercises can be reordered at once"))]
    pub exercise_ids: Vec<ExerciseId>,
}

// ============================================================================
// Progress Requests
// ============================================================================

/// Record a completion or skip; `date` defaults to today
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkExerciseRequest {
    pub exercise_id: ExerciseId,
    pub status: CompletionStatus,
    pub date: Option<NaiveDate>,
}

/// `?date=` query for daily stats
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyStatsQuery {
    pub date: Option<NaiveDate>,
}

/// `?week_start=` query for weekly stats
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeeklyStatsQuery {
    pub week_start: Option<NaiveDate>,
}

fn validate_json_document(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_json"))
}
