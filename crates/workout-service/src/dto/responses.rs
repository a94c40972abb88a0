//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Identifiers serialize as plain JSON numbers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use workout_core::{
    CompletionStatus, ConnectionId, ExerciseId, ExerciseStatusId, Gender, InvitationStatus,
    UserId, UserRole, WorkoutDayId, WorkoutId,
};

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Full profile of the authenticated user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links_json: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public user response (for viewing other users)
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// Invitation Responses
// ============================================================================

/// Relationship record with both parties' names
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub id: ConnectionId,
    pub student_id: UserId,
    pub student_name: String,
    pub student_email: String,
    pub instructor_id: UserId,
    pub instructor_name: String,
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub connected_at: Option<DateTime<Utc>>,
}

/// Instructor card shown to students
#[derive(Debug, Clone, Serialize)]
pub struct InstructorSummaryResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links_json: Option<String>,
    /// Students currently connected to the instructor
    pub students_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<DateTime<Utc>>,
}

/// Invitation waiting for the student's answer
#[derive(Debug, Clone, Serialize)]
pub struct PendingInvitationResponse {
    pub id: ConnectionId,
    pub invited_at: DateTime<Utc>,
    pub instructor: InstructorSummaryResponse,
}

/// The student's most recently connected instructor
#[derive(Debug, Clone, Serialize)]
pub struct CurrentTrainerResponse {
    pub has_trainer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<InstructorSummaryResponse>,
}

/// Result of an invite call
#[derive(Debug, Clone)]
pub enum InviteOutcome {
    /// A new pending invitation was stored
    Created(InvitationResponse),
    /// The pair was already connected; nothing was stored
    AlreadyConnected(InvitationResponse),
}

impl InviteOutcome {
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    #[must_use]
    pub fn into_inner(self) -> InvitationResponse {
        match self {
            Self::Created(inner) | Self::AlreadyConnected(inner) => inner,
        }
    }
}

// ============================================================================
// Roster Responses
// ============================================================================

/// Per-student card on the instructor's roster
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummaryResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    /// 0 when the student has no active workout
    pub active_workout_id: i64,
    pub active_workout_name: String,
    pub completed_exercises_today: usize,
    pub total_exercises_today: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Workout Responses
// ============================================================================

/// Workout list entry with derived counts
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutSummaryResponse {
    pub id: WorkoutId,
    pub student_id: UserId,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub days_count: usize,
    pub exercises_count: usize,
}

/// Workout with its days and exercises
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetailResponse {
    pub id: WorkoutId,
    pub student_id: UserId,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub days: Vec<WorkoutDayResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDayResponse {
    pub id: WorkoutDayId,
    pub workout_id: WorkoutId,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i16,
    pub day_name: String,
    pub exercises: Vec<ExerciseResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseResponse {
    pub id: ExerciseId,
    pub workout_day_id: WorkoutDayId,
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

// ============================================================================
// Progress Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseStatusResponse {
    pub id: ExerciseStatusId,
    pub exercise_id: ExerciseId,
    pub student_id: UserId,
    pub date: NaiveDate,
    pub status: CompletionStatus,
    pub recorded_at: DateTime<Utc>,
}

/// Outcome counts for one date
#[derive(Debug, Clone, Serialize)]
pub struct DailyStatsResponse {
    pub date: NaiveDate,
    pub completed_exercises: usize,
    pub skipped_exercises: usize,
    pub total_exercises: usize,
    pub completion_rate: f64,
}

/// Seven days starting on `week_start_date`
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStatsResponse {
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub daily_stats: Vec<DailyStatsResponse>,
    pub total_completed: usize,
    pub total_skipped: usize,
    pub total_exercises: usize,
    pub weekly_completion_rate: f64,
}

// ============================================================================
// Statistics Responses
// ============================================================================

/// Instructor dashboard report
#[derive(Debug, Clone, Serialize)]
pub struct InstructorStatisticsResponse {
    pub generated_at: DateTime<Utc>,
    pub students: StudentStatsResponse,
    pub workouts: WorkoutStatsResponse,
    pub completion: CompletionStatsResponse,
    pub trends: TrendsResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentStatsResponse {
    pub total: usize,
    pub new_this_week: usize,
    pub new_this_month: usize,
    pub new_previous_month: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutStatsResponse {
    pub total: usize,
    pub this_week: usize,
    pub this_month: usize,
    pub previous_month: usize,
}

/// Completion percentages, each in `[0, 100]`
#[derive(Debug, Clone, Serialize)]
pub struct CompletionStatsResponse {
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub previous_month: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendsResponse {
    pub students: TrendResponse,
    pub completion_rate: TrendResponse,
    pub workouts: TrendResponse,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrendResponse {
    pub value: f64,
    pub is_positive: bool,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
