//! Database models - SQLx-compatible structs for PostgreSQL tables

mod connection;
mod exercise;
mod exercise_status;
mod user;
mod workout;

pub use connection::ConnectionModel;
pub use exercise::ExerciseModel;
pub use exercise_status::ExerciseStatusModel;
pub use user::{UserModel, USER_COLUMNS};
pub use workout::{WorkoutDayModel, WorkoutModel};
