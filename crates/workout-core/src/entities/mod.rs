//! Domain entities - core business objects

mod connection;
mod exercise;
mod exercise_status;
mod user;
mod workout;

pub use connection::{Connection, NewConnection};
pub use exercise::{compact_orders, next_order, plan_reorder, Exercise, ExercisePatch, NewExercise};
pub use exercise_status::{ExerciseStatus, NewExerciseStatus};
pub use user::{NewUser, User};
pub use workout::{NewWorkout, Workout, WorkoutDay, WorkoutDayTree, WorkoutTree};
