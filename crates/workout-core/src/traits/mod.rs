mod repositories;

pub use repositories::{
    ConnectionRepository, ExerciseRepository, ExerciseStatusRepository, RepoResult,
    UserRepository, WorkoutDayRepository, WorkoutRepository,
};
