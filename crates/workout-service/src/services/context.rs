//! Service context - dependency container for services
//!
//! Holds all repositories and the token service needed by services.

use std::sync::Arc;

use workout_common::auth::JwtService;
use workout_core::traits::{
    ConnectionRepository, ExerciseRepository, ExerciseStatusRepository, UserRepository,
    WorkoutDayRepository, WorkoutRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Repositories are trait objects so the same services run against
/// PostgreSQL or an in-memory store.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
    workout_repo: Arc<dyn WorkoutRepository>,
    workout_day_repo: Arc<dyn WorkoutDayRepository>,
    exercise_repo: Arc<dyn ExerciseRepository>,
    exercise_status_repo: Arc<dyn ExerciseStatusRepository>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        connection_repo: Arc<dyn ConnectionRepository>,
        workout_repo: Arc<dyn WorkoutRepository>,
        workout_day_repo: Arc<dyn WorkoutDayRepository>,
        exercise_repo: Arc<dyn ExerciseRepository>,
        exercise_status_repo: Arc<dyn ExerciseStatusRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            connection_repo,
            workout_repo,
            workout_day_repo,
            exercise_repo,
            exercise_status_repo,
            jwt_service,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the instructor/student relationship repository
    pub fn connection_repo(&self) -> &dyn ConnectionRepository {
        self.connection_repo.as_ref()
    }

    /// Get the workout repository
    pub fn workout_repo(&self) -> &dyn WorkoutRepository {
        self.workout_repo.as_ref()
    }

    /// Get the workout day repository
    pub fn workout_day_repo(&self) -> &dyn WorkoutDayRepository {
        self.workout_day_repo.as_ref()
    }

    /// Get the exercise repository
    pub fn exercise_repo(&self) -> &dyn ExerciseRepository {
        self.exercise_repo.as_ref()
    }

    /// Get the exercise status repository
    pub fn exercise_status_repo(&self) -> &dyn ExerciseStatusRepository {
        self.exercise_status_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    connection_repo: Option<Arc<dyn ConnectionRepository>>,
    workout_repo: Option<Arc<dyn WorkoutRepository>>,
    workout_day_repo: Option<Arc<dyn WorkoutDayRepository>>,
    exercise_repo: Option<Arc<dyn ExerciseRepository>>,
    exercise_status_repo: Option<Arc<dyn ExerciseStatusRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn connection_repo(mut self, repo: Arc<dyn ConnectionRepository>) -> Self {
        self.connection_repo = Some(repo);
        self
    }

    pub fn workout_repo(mut self, repo: Arc<dyn WorkoutRepository>) -> Self {
        self.workout_repo = Some(repo);
        self
    }

    pub fn workout_day_repo(mut self, repo: Arc<dyn WorkoutDayRepository>) -> Self {
        self.workout_day_repo = Some(repo);
        self
    }

    pub fn exercise_repo(mut self, repo: Arc<dyn ExerciseRepository>) -> Self {
        self.exercise_repo = Some(repo);
        self
    }

    pub fn exercise_status_repo(mut self, repo: Arc<dyn ExerciseStatusRepository>) -> Self {
        self.exercise_status_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::InvalidArgument` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |name: &str| ServiceError::invalid_argument(format!("{name} is required"));

        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| missing("user_repo"))?,
            self.connection_repo.ok_or_else(|| missing("connection_repo"))?,
            self.workout_repo.ok_or_else(|| missing("workout_repo"))?,
            self.workout_day_repo.ok_or_else(|| missing("workout_day_repo"))?,
            self.exercise_repo.ok_or_else(|| missing("exercise_repo"))?,
            self.exercise_status_repo.ok_or_else(|| missing("exercise_status_repo"))?,
            self.jwt_service.ok_or_else(|| missing("jwt_service"))?,
        ))
    }
}
