//! Domain errors - error types for the domain layer

use chrono::Weekday;
use thiserror::Error;

use crate::value_objects::{
    ConnectionId, ExerciseId, InvitationStatus, UserId, UserRole, WorkoutDayId, WorkoutId,
};

/// Domain layer errors
///
/// Every variant belongs to exactly one error kind (not found, forbidden,
/// invalid argument, conflict, invalid state) or is an infrastructure failure.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Instructor not found: {0}")]
    InstructorNotFound(UserId),

    #[error("Invitation not found: {0}")]
    InvitationNotFound(ConnectionId),

    #[error("No accepted connection between instructor {instructor_id} and student {student_id}")]
    ConnectionNotFound {
        instructor_id: UserId,
        student_id: UserId,
    },

    #[error("Workout not found: {0}")]
    WorkoutNotFound(WorkoutId),

    #[error("Workout day not found: {0}")]
    WorkoutDayNotFound(WorkoutDayId),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(ExerciseId),

    // =========================================================================
    // Forbidden Errors
    // =========================================================================
    #[error("Operation requires the {required} role")]
    RoleRequired { required: UserRole },

    // =========================================================================
    // Invalid Argument Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Either a student id or an email must be provided")]
    MissingStudentReference,

    #[error("User {0} is not a student")]
    NotAStudent(UserId),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("An invitation to this student is already pending")]
    InvitationAlreadyPending,

    #[error("Student is already connected to this instructor")]
    AlreadyConnected,

    #[error("Workout already has a day for {0}")]
    DuplicateWorkoutDay(Weekday),

    #[error("Exercise order conflict on workout day {0}")]
    ExerciseOrderConflict(WorkoutDayId),

    #[error("Another workout of student {0} was activated concurrently")]
    ActiveWorkoutConflict(UserId),

    // =========================================================================
    // Invalid State Errors
    // =========================================================================
    #[error("Invitation is {status}, only pending invitations can be answered")]
    InvitationNotPending { status: InvitationStatus },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::StudentNotFound(_) => "UNKNOWN_STUDENT",
            Self::InstructorNotFound(_) => "UNKNOWN_INSTRUCTOR",
            Self::InvitationNotFound(_) => "UNKNOWN_INVITATION",
            Self::ConnectionNotFound { .. } => "UNKNOWN_CONNECTION",
            Self::WorkoutNotFound(_) => "UNKNOWN_WORKOUT",
            Self::WorkoutDayNotFound(_) => "UNKNOWN_WORKOUT_DAY",
            Self::ExerciseNotFound(_) => "UNKNOWN_EXERCISE",

            // Forbidden
            Self::RoleRequired { .. } => "ROLE_REQUIRED",

            // Invalid Argument
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingStudentReference => "MISSING_STUDENT_REFERENCE",
            Self::NotAStudent(_) => "NOT_A_STUDENT",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::InvitationAlreadyPending => "INVITATION_ALREADY_PENDING",
            Self::AlreadyConnected => "ALREADY_CONNECTED",
            Self::DuplicateWorkoutDay(_) => "DUPLICATE_WORKOUT_DAY",
            Self::ExerciseOrderConflict(_) => "EXERCISE_ORDER_CONFLICT",
            Self::ActiveWorkoutConflict(_) => "ACTIVE_WORKOUT_CONFLICT",

            // Invalid State
            Self::InvitationNotPending { .. } => "INVITATION_NOT_PENDING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::StudentNotFound(_)
                | Self::InstructorNotFound(_)
                | Self::InvitationNotFound(_)
                | Self::ConnectionNotFound { .. }
                | Self::WorkoutNotFound(_)
                | Self::WorkoutDayNotFound(_)
                | Self::ExerciseNotFound(_)
        )
    }

    /// Check if this is a role/authorization error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::RoleRequired { .. })
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingStudentReference
                | Self::NotAStudent(_)
                | Self::WeakPassword(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::InvitationAlreadyPending
                | Self::AlreadyConnected
                | Self::DuplicateWorkoutDay(_)
                | Self::ExerciseOrderConflict(_)
                | Self::ActiveWorkoutConflict(_)
        )
    }

    /// Check if this is a lifecycle state error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvitationNotPending { .. })
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_forbidden() {
            403
        } else if self.is_invalid_argument() || self.is_invalid_state() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
