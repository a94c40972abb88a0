//! PostgreSQL implementation of ExerciseRepository
//!
//! `exercises_unique_order` is deferred, so orders can be permuted freely
//! inside a transaction and are checked once at commit.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument};

use workout_core::entities::{compact_orders, Exercise, NewExercise};
use workout_core::error::DomainError;
use workout_core::traits::{ExerciseRepository, RepoResult};
use workout_core::value_objects::{ExerciseId, UserId, WorkoutDayId};

use crate::models::ExerciseModel;

use super::error::{map_constraint_violation, map_db_error};

const ORDER_CONSTRAINT: &str = "exercises_unique_order";

/// PostgreSQL implementation of ExerciseRepository
#[derive(Clone)]
pub struct PgExerciseRepository {
    pool: PgPool,
}

impl PgExerciseRepository {
    /// Create a new PgExerciseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn write_orders(
        tx: &mut Transaction<'_, Postgres>,
        day_id: WorkoutDayId,
        orders: &[(ExerciseId, i32)],
    ) -> RepoResult<()> {
        for (id, order) in orders {
            sqlx::query(r#"UPDATE exercises SET "order" = $3 WHERE id = $1 AND workout_day_id = $2"#)
                .bind(id.into_inner())
                .bind(day_id.into_inner())
                .bind(order)
                .execute(&mut **tx)
                .await
                .map_err(map_db_error)?;
        }
        Ok(())
    }

    async fn commit(tx: Transaction<'_, Postgres>, day_id: WorkoutDayId) -> RepoResult<()> {
        tx.commit().await.map_err(|e| {
            map_constraint_violation(e, ORDER_CONSTRAINT, || {
                DomainError::ExerciseOrderConflict(day_id)
            })
        })
    }
}

#[async_trait]
impl ExerciseRepository for PgExerciseRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ExerciseId) -> RepoResult<Option<Exercise>> {
        let result = sqlx::query_as::<_, ExerciseModel>(
            r#"
            SELECT id, workout_day_id, exercise_db_id, name, body_part, equipment, gif_url,
                   sets, repetitions, weight, rest_seconds, "order", notes
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Exercise::from))
    }

    #[instrument(skip(self))]
    async fn find_by_day(&self, day_id: WorkoutDayId) -> RepoResult<Vec<Exercise>> {
        let results = sqlx::query_as::<_, ExerciseModel>(
            r#"
            SELECT id, workout_day_id, exercise_db_id, name, body_part, equipment, gif_url,
                   sets, repetitions, weight, rest_seconds, "order", notes
            FROM exercises
            WHERE workout_day_id = $1
            ORDER BY "order", id
            "#,
        )
        .bind(day_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Exercise::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_student_of(&self, id: ExerciseId) -> RepoResult<Option<UserId>> {
        let student: Option<i64> = sqlx::query_scalar(
            r"
            SELECT w.student_id
            FROM exercises e
            JOIN workout_days d ON d.id = e.workout_day_id
            JOIN workouts w ON w.id = d.workout_id
            WHERE e.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(student.map(UserId::new))
    }

    #[instrument(skip(self, exercise), fields(day_id = %exercise.workout_day_id))]
    async fn append(&self, exercise: &NewExercise) -> RepoResult<Exercise> {
        let day_id = exercise.workout_day_id;

        // The order is computed in the same statement; a concurrent append
        // colliding on it fails at commit on the deferred constraint.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ExerciseModel>(
            r#"
            INSERT INTO exercises (workout_day_id, exercise_db_id, name, body_part, equipment,
                                   gif_url, sets, repetitions, weight, rest_seconds, notes, "order")
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                   COALESCE(MAX("order") + 1, 0)
            FROM exercises
            WHERE workout_day_id = $1
            RETURNING id, workout_day_id, exercise_db_id, name, body_part, equipment, gif_url,
                      sets, repetitions, weight, rest_seconds, "order", notes
            "#,
        )
        .bind(day_id.into_inner())
        .bind(&exercise.exercise_db_id)
        .bind(&exercise.name)
        .bind(&exercise.body_part)
        .bind(&exercise.equipment)
        .bind(&exercise.gif_url)
        .bind(&exercise.sets)
        .bind(&exercise.repetitions)
        .bind(exercise.weight)
        .bind(exercise.rest_seconds)
        .bind(&exercise.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        Self::commit(tx, day_id).await?;

        Ok(Exercise::from(model))
    }

    #[instrument(skip(self, exercise), fields(exercise_id = %exercise.id))]
    async fn update(&self, exercise: &Exercise) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE exercises
            SET sets = $2, repetitions = $3, weight = $4, rest_seconds = $5, notes = $6
            WHERE id = $1
            ",
        )
        .bind(exercise.id.into_inner())
        .bind(&exercise.sets)
        .bind(&exercise.repetitions)
        .bind(exercise.weight)
        .bind(exercise.rest_seconds)
        .bind(&exercise.notes)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ExerciseNotFound(exercise.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ExerciseId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let day_id: Option<i64> =
            sqlx::query_scalar("DELETE FROM exercises WHERE id = $1 RETURNING workout_day_id")
                .bind(id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;

        let Some(day_id) = day_id.map(WorkoutDayId::new) else {
            return Err(DomainError::ExerciseNotFound(id));
        };

        let remaining: Vec<i64> = sqlx::query_scalar(
            r#"SELECT id FROM exercises WHERE workout_day_id = $1 ORDER BY "order", id FOR UPDATE"#,
        )
        .bind(day_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let remaining: Vec<ExerciseId> = remaining.into_iter().map(ExerciseId::new).collect();
        let orders = compact_orders(&remaining, id);
        Self::write_orders(&mut tx, day_id, &orders).await?;

        Self::commit(tx, day_id).await?;

        info!(exercise_id = %id, day_id = %day_id, remaining = orders.len(), "Exercise removed");
        Ok(())
    }

    #[instrument(skip(self, orders), fields(count = orders.len()))]
    async fn apply_orders(
        &self,
        day_id: WorkoutDayId,
        orders: &[(ExerciseId, i32)],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::write_orders(&mut tx, day_id, orders).await?;

        Self::commit(tx, day_id).await
    }
}
