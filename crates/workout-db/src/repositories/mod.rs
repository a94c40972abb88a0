//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in workout-core.
//! Each repository handles database operations for a specific domain entity.

mod connection;
mod error;
mod exercise;
mod exercise_status;
mod user;
mod workout;
mod workout_day;

pub use connection::PgConnectionRepository;
pub use exercise::PgExerciseRepository;
pub use exercise_status::PgExerciseStatusRepository;
pub use user::PgUserRepository;
pub use workout::PgWorkoutRepository;
pub use workout_day::PgWorkoutDayRepository;
