//! # workout-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! pure reporting math. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod stats;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    compact_orders, next_order, plan_reorder, Connection, Exercise, ExercisePatch,
    ExerciseStatus, NewConnection, NewExercise, NewExerciseStatus, NewUser, NewWorkout, User,
    Workout, WorkoutDay, WorkoutDayTree, WorkoutTree,
};
pub use error::DomainError;
pub use traits::{
    ConnectionRepository, ExerciseRepository, ExerciseStatusRepository, RepoResult,
    UserRepository, WorkoutDayRepository, WorkoutRepository,
};
pub use value_objects::{
    CompletionStatus, ConnectionId, ExerciseId, ExerciseStatusId, Gender, IdParseError,
    InvitationStatus, UserId, UserRole, WorkoutDayId, WorkoutId,
};
