//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Storage-level uniqueness guards surface as
//! `Conflict` domain errors.

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};

use crate::entities::{
    Connection, Exercise, ExerciseStatus, NewConnection, NewExercise, NewExerciseStatus, NewUser,
    NewWorkout, User, Workout, WorkoutDay, WorkoutTree,
};
use crate::error::DomainError;
use crate::value_objects::{
    ConnectionId, ExerciseId, InvitationStatus, UserId, WorkoutDayId, WorkoutId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Load several users at once, in no particular order
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Users whose name or email contains `query`, case-insensitive
    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<User>>;

    /// Register a new user
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Persist profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;

    /// Delete the account and everything that references it.
    ///
    /// Runs as one unit: exercise statuses, relationships and workouts are
    /// removed before the user row.
    async fn delete_account(&self, id: UserId) -> RepoResult<()>;
}

// ============================================================================
// Connection Repository
// ============================================================================

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Find relationship record by ID
    async fn find_by_id(&self, id: ConnectionId) -> RepoResult<Option<Connection>>;

    /// Find the record for a pair in the given status
    async fn find_by_pair(
        &self,
        student_id: UserId,
        instructor_id: UserId,
        status: InvitationStatus,
    ) -> RepoResult<Option<Connection>>;

    /// Create a pending invitation.
    ///
    /// Fails with `InvitationAlreadyPending` when the pair already has one.
    async fn create(&self, connection: &NewConnection) -> RepoResult<Connection>;

    /// Store the answer carried by `connection` if the stored record is still
    /// pending and addressed to `connection.student_id`.
    ///
    /// Returns `false` when the precondition no longer holds.
    async fn save_response(&self, connection: &Connection) -> RepoResult<bool>;

    /// Delete the accepted record for a pair, returning whether one existed
    async fn delete_accepted(&self, student_id: UserId, instructor_id: UserId)
        -> RepoResult<bool>;

    /// Pending invitations addressed to a student, newest first
    async fn find_pending_for_student(&self, student_id: UserId) -> RepoResult<Vec<Connection>>;

    /// Every record created by an instructor, newest first
    async fn find_by_instructor(&self, instructor_id: UserId) -> RepoResult<Vec<Connection>>;

    /// Accepted records of an instructor, most recently connected first
    async fn find_accepted_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> RepoResult<Vec<Connection>>;

    /// Accepted records of a student, most recently connected first
    async fn find_accepted_by_student(&self, student_id: UserId) -> RepoResult<Vec<Connection>>;

    /// Number of students currently connected to an instructor
    async fn count_accepted_students(&self, instructor_id: UserId) -> RepoResult<i64>;
}

// ============================================================================
// Workout Repository
// ============================================================================

#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Find workout by ID
    async fn find_by_id(&self, id: WorkoutId) -> RepoResult<Option<Workout>>;

    /// Workouts of a student, newest first
    async fn find_by_student(&self, student_id: UserId) -> RepoResult<Vec<Workout>>;

    /// Workouts of several students
    async fn find_by_students(&self, student_ids: &[UserId]) -> RepoResult<Vec<Workout>>;

    /// Most recently created active workout of a student
    async fn find_active_by_student(&self, student_id: UserId) -> RepoResult<Option<Workout>>;

    /// Create an active workout, deactivating the student's other workouts
    async fn create(&self, workout: &NewWorkout) -> RepoResult<Workout>;

    /// Persist name and active flag; activating deactivates the siblings
    async fn update(&self, workout: &Workout) -> RepoResult<()>;

    /// Delete a workout with its days and exercises
    async fn delete(&self, id: WorkoutId) -> RepoResult<()>;

    /// Load the workout with days and exercises
    async fn load_tree(&self, id: WorkoutId) -> RepoResult<Option<WorkoutTree>>;

    /// Load every workout tree of a student, newest first
    async fn load_trees_by_student(&self, student_id: UserId) -> RepoResult<Vec<WorkoutTree>>;
}

// ============================================================================
// Workout Day Repository
// ============================================================================

#[async_trait]
pub trait WorkoutDayRepository: Send + Sync {
    /// Find day by ID
    async fn find_by_id(&self, id: WorkoutDayId) -> RepoResult<Option<WorkoutDay>>;

    /// Days of a workout
    async fn find_by_workout(&self, workout_id: WorkoutId) -> RepoResult<Vec<WorkoutDay>>;

    /// Add a day; fails with `DuplicateWorkoutDay` when the weekday exists
    async fn create(&self, workout_id: WorkoutId, day_of_week: Weekday) -> RepoResult<WorkoutDay>;

    /// Delete a day with its exercises
    async fn delete(&self, id: WorkoutDayId) -> RepoResult<()>;
}

// ============================================================================
// Exercise Repository
// ============================================================================

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Find exercise by ID
    async fn find_by_id(&self, id: ExerciseId) -> RepoResult<Option<Exercise>>;

    /// Exercises of a day sorted by order
    async fn find_by_day(&self, day_id: WorkoutDayId) -> RepoResult<Vec<Exercise>>;

    /// Student owning the workout the exercise belongs to
    async fn find_student_of(&self, id: ExerciseId) -> RepoResult<Option<UserId>>;

    /// Append an exercise after the day's last one
    async fn append(&self, exercise: &NewExercise) -> RepoResult<Exercise>;

    /// Persist prescription fields
    async fn update(&self, exercise: &Exercise) -> RepoResult<()>;

    /// Delete an exercise and renumber the remaining ones of its day
    async fn delete(&self, id: ExerciseId) -> RepoResult<()>;

    /// Rewrite the orders of a day's exercises as one unit
    async fn apply_orders(&self, day_id: WorkoutDayId, orders: &[(ExerciseId, i32)])
        -> RepoResult<()>;
}

// ============================================================================
// Exercise Status Repository
// ============================================================================

#[async_trait]
pub trait ExerciseStatusRepository: Send + Sync {
    /// Record an outcome, replacing the one with the same triple
    async fn upsert(&self, status: &NewExerciseStatus) -> RepoResult<ExerciseStatus>;

    /// Statuses a student recorded for one date
    async fn find_by_student_on(
        &self,
        student_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Vec<ExerciseStatus>>;

    /// Statuses a student recorded in `[from, until)`
    async fn find_by_student_between(
        &self,
        student_id: UserId,
        from: NaiveDate,
        until: NaiveDate,
    ) -> RepoResult<Vec<ExerciseStatus>>;

    /// Every status recorded by the given students
    async fn find_by_students(&self, student_ids: &[UserId]) -> RepoResult<Vec<ExerciseStatus>>;
}
