//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AddExerciseRequest, AddWorkoutDayRequest, CreateWorkoutRequest, DailyStatsQuery,
    InviteStudentRequest, LoginRequest, MarkExerciseRequest, RefreshTokenRequest,
    RegisterRequest, ReorderExercisesRequest, SearchUsersQuery, UpdateExerciseRequest,
    UpdateInstructorProfileRequest, UpdateStudentProfileRequest, UpdateUserRequest,
    UpdateWorkoutRequest, WeeklyStatsQuery,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, CompletionStatsResponse, CurrentTrainerResponse, DailyStatsResponse,
    ExerciseResponse, ExerciseStatusResponse, HealthChecks, HealthResponse,
    InstructorStatisticsResponse, InstructorSummaryResponse, InvitationResponse, InviteOutcome,
    PendingInvitationResponse, PublicUserResponse, ReadinessResponse, StudentStatsResponse,
    StudentSummaryResponse, TrendResponse, TrendsResponse, UserResponse, WeeklyStatsResponse,
    WorkoutDayResponse, WorkoutDetailResponse, WorkoutStatsResponse, WorkoutSummaryResponse,
};

// Re-export mappers and helper structs
pub use mappers::{InstructorWithCount, InvitationWithParties};
