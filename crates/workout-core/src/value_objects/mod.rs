//! Value objects - immutable types that represent domain concepts

mod day_of_week;
mod ids;
mod role;
mod status;

pub use day_of_week::{start_of_week, weekday_from_number, weekday_to_number};
pub use ids::{
    ConnectionId, ExerciseId, ExerciseStatusId, IdParseError, UserId, WorkoutDayId, WorkoutId,
};
pub use role::{Gender, UserRole};
pub use status::{CompletionStatus, InvitationStatus};
