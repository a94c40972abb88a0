//! PostgreSQL implementation of WorkoutDayRepository

use async_trait::async_trait;
use chrono::Weekday;
use sqlx::PgPool;
use tracing::instrument;

use workout_core::entities::WorkoutDay;
use workout_core::error::DomainError;
use workout_core::traits::{RepoResult, WorkoutDayRepository};
use workout_core::value_objects::{weekday_to_number, WorkoutDayId, WorkoutId};

use crate::models::WorkoutDayModel;

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of WorkoutDayRepository
#[derive(Clone)]
pub struct PgWorkoutDayRepository {
    pool: PgPool,
}

impl PgWorkoutDayRepository {
    /// Create a new PgWorkoutDayRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutDayRepository for PgWorkoutDayRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: WorkoutDayId) -> RepoResult<Option<WorkoutDay>> {
        let result = sqlx::query_as::<_, WorkoutDayModel>(
            r"
            SELECT id, workout_id, day_of_week
            FROM workout_days
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(WorkoutDay::from))
    }

    #[instrument(skip(self))]
    async fn find_by_workout(&self, workout_id: WorkoutId) -> RepoResult<Vec<WorkoutDay>> {
        let results = sqlx::query_as::<_, WorkoutDayModel>(
            r"
            SELECT id, workout_id, day_of_week
            FROM workout_days
            WHERE workout_id = $1
            ORDER BY day_of_week
            ",
        )
        .bind(workout_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(WorkoutDay::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, workout_id: WorkoutId, day_of_week: Weekday) -> RepoResult<WorkoutDay> {
        let model = sqlx::query_as::<_, WorkoutDayModel>(
            r"
            INSERT INTO workout_days (workout_id, day_of_week)
            VALUES ($1, $2)
            RETURNING id, workout_id, day_of_week
            ",
        )
        .bind(workout_id.into_inner())
        .bind(weekday_to_number(day_of_week))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, "workout_days_unique_day", || {
                DomainError::DuplicateWorkoutDay(day_of_week)
            })
        })?;

        Ok(WorkoutDay::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: WorkoutDayId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM workout_days WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::WorkoutDayNotFound(id));
        }

        Ok(())
    }
}
