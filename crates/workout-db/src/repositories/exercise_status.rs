//! PostgreSQL implementation of ExerciseStatusRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use workout_core::entities::{ExerciseStatus, NewExerciseStatus};
use workout_core::traits::{ExerciseStatusRepository, RepoResult};
use workout_core::value_objects::UserId;

use crate::models::ExerciseStatusModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ExerciseStatusRepository
#[derive(Clone)]
pub struct PgExerciseStatusRepository {
    pool: PgPool,
}

impl PgExerciseStatusRepository {
    /// Create a new PgExerciseStatusRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExerciseStatusRepository for PgExerciseStatusRepository {
    #[instrument(skip(self, status), fields(exercise_id = %status.exercise_id, date = %status.date))]
    async fn upsert(&self, status: &NewExerciseStatus) -> RepoResult<ExerciseStatus> {
        let model = sqlx::query_as::<_, ExerciseStatusModel>(
            r"
            INSERT INTO exercise_statuses (exercise_id, student_id, date, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (exercise_id, student_id, date)
            DO UPDATE SET status = EXCLUDED.status, recorded_at = NOW()
            RETURNING id, exercise_id, student_id, date, status, recorded_at
            ",
        )
        .bind(status.exercise_id.into_inner())
        .bind(status.student_id.into_inner())
        .bind(status.date)
        .bind(status.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ExerciseStatus::from(model))
    }

    #[instrument(skip(self))]
    async fn find_by_student_on(
        &self,
        student_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Vec<ExerciseStatus>> {
        let results = sqlx::query_as::<_, ExerciseStatusModel>(
            r"
            SELECT id, exercise_id, student_id, date, status, recorded_at
            FROM exercise_statuses
            WHERE student_id = $1 AND date = $2
            ",
        )
        .bind(student_id.into_inner())
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ExerciseStatus::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_student_between(
        &self,
        student_id: UserId,
        from: NaiveDate,
        until: NaiveDate,
    ) -> RepoResult<Vec<ExerciseStatus>> {
        let results = sqlx::query_as::<_, ExerciseStatusModel>(
            r"
            SELECT id, exercise_id, student_id, date, status, recorded_at
            FROM exercise_statuses
            WHERE student_id = $1 AND date >= $2 AND date < $3
            ORDER BY date
            ",
        )
        .bind(student_id.into_inner())
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ExerciseStatus::from).collect())
    }

    #[instrument(skip(self, student_ids), fields(count = student_ids.len()))]
    async fn find_by_students(&self, student_ids: &[UserId]) -> RepoResult<Vec<ExerciseStatus>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = student_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, ExerciseStatusModel>(
            r"
            SELECT id, exercise_id, student_id, date, status, recorded_at
            FROM exercise_statuses
            WHERE student_id = ANY($1)
            ",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ExerciseStatus::from).collect())
    }
}
