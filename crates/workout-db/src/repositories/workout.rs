//! PostgreSQL implementation of WorkoutRepository
//!
//! A student has at most one active workout; activating one deactivates the
//! others inside the same transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use workout_core::entities::{Exercise, NewWorkout, Workout, WorkoutDay, WorkoutTree};
use workout_core::error::DomainError;
use workout_core::traits::{RepoResult, WorkoutRepository};
use workout_core::value_objects::{UserId, WorkoutId};

use crate::models::{ExerciseModel, WorkoutDayModel, WorkoutModel};

use super::error::{map_constraint_violation, map_db_error};

const ACTIVE_INDEX: &str = "workouts_one_active_per_student";

/// PostgreSQL implementation of WorkoutRepository
#[derive(Clone)]
pub struct PgWorkoutRepository {
    pool: PgPool,
}

impl PgWorkoutRepository {
    /// Create a new PgWorkoutRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deactivate every active workout of a student except `keep`
    async fn deactivate_others(
        tx: &mut Transaction<'_, Postgres>,
        student_id: UserId,
        keep: Option<WorkoutId>,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE workouts
            SET is_active = FALSE
            WHERE student_id = $1 AND is_active AND ($2::BIGINT IS NULL OR id <> $2)
            ",
        )
        .bind(student_id.into_inner())
        .bind(keep.map(WorkoutId::into_inner))
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    /// Days and exercises of the given workouts
    async fn load_children(
        &self,
        workout_ids: &[i64],
    ) -> RepoResult<(Vec<WorkoutDay>, Vec<Exercise>)> {
        let days = sqlx::query_as::<_, WorkoutDayModel>(
            r"
            SELECT id, workout_id, day_of_week
            FROM workout_days
            WHERE workout_id = ANY($1)
            ORDER BY day_of_week
            ",
        )
        .bind(workout_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let exercises = sqlx::query_as::<_, ExerciseModel>(
            r#"
            SELECT e.id, e.workout_day_id, e.exercise_db_id, e.name, e.body_part, e.equipment,
                   e.gif_url, e.sets, e.repetitions, e.weight, e.rest_seconds, e."order", e.notes
            FROM exercises e
            JOIN workout_days d ON d.id = e.workout_day_id
            WHERE d.workout_id = ANY($1)
            ORDER BY e.workout_day_id, e."order"
            "#,
        )
        .bind(workout_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((
            days.into_iter().map(WorkoutDay::from).collect(),
            exercises.into_iter().map(Exercise::from).collect(),
        ))
    }
}

#[async_trait]
impl WorkoutRepository for PgWorkoutRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: WorkoutId) -> RepoResult<Option<Workout>> {
        let result = sqlx::query_as::<_, WorkoutModel>(
            r"
            SELECT id, student_id, name, is_active, created_at
            FROM workouts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Workout::from))
    }

    #[instrument(skip(self))]
    async fn find_by_student(&self, student_id: UserId) -> RepoResult<Vec<Workout>> {
        let results = sqlx::query_as::<_, WorkoutModel>(
            r"
            SELECT id, student_id, name, is_active, created_at
            FROM workouts
            WHERE student_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(student_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Workout::from).collect())
    }

    #[instrument(skip(self, student_ids), fields(count = student_ids.len()))]
    async fn find_by_students(&self, student_ids: &[UserId]) -> RepoResult<Vec<Workout>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = student_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, WorkoutModel>(
            r"
            SELECT id, student_id, name, is_active, created_at
            FROM workouts
            WHERE student_id = ANY($1)
            ",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Workout::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_active_by_student(&self, student_id: UserId) -> RepoResult<Option<Workout>> {
        let result = sqlx::query_as::<_, WorkoutModel>(
            r"
            SELECT id, student_id, name, is_active, created_at
            FROM workouts
            WHERE student_id = $1 AND is_active
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(student_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Workout::from))
    }

    #[instrument(skip(self, workout), fields(student_id = %workout.student_id))]
    async fn create(&self, workout: &NewWorkout) -> RepoResult<Workout> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::deactivate_others(&mut tx, workout.student_id, None).await?;

        let model = sqlx::query_as::<_, WorkoutModel>(
            r"
            INSERT INTO workouts (student_id, name, is_active)
            VALUES ($1, $2, TRUE)
            RETURNING id, student_id, name, is_active, created_at
            ",
        )
        .bind(workout.student_id.into_inner())
        .bind(&workout.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(e, ACTIVE_INDEX, || {
                DomainError::ActiveWorkoutConflict(workout.student_id)
            })
        })?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Workout::from(model))
    }

    #[instrument(skip(self, workout), fields(workout_id = %workout.id))]
    async fn update(&self, workout: &Workout) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if workout.is_active {
            Self::deactivate_others(&mut tx, workout.student_id, Some(workout.id)).await?;
        }

        let result = sqlx::query(
            r"
            UPDATE workouts SET name = $2, is_active = $3 WHERE id = $1
            ",
        )
        .bind(workout.id.into_inner())
        .bind(&workout.name)
        .bind(workout.is_active)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(e, ACTIVE_INDEX, || {
                DomainError::ActiveWorkoutConflict(workout.student_id)
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::WorkoutNotFound(workout.id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: WorkoutId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::WorkoutNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn load_tree(&self, id: WorkoutId) -> RepoResult<Option<WorkoutTree>> {
        let Some(workout) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let (days, exercises) = self.load_children(&[id.into_inner()]).await?;
        Ok(Some(WorkoutTree::assemble(workout, days, exercises)))
    }

    #[instrument(skip(self))]
    async fn load_trees_by_student(&self, student_id: UserId) -> RepoResult<Vec<WorkoutTree>> {
        let workouts = self.find_by_student(student_id).await?;
        if workouts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = workouts.iter().map(|w| w.id.into_inner()).collect();
        let (days, exercises) = self.load_children(&ids).await?;

        Ok(workouts
            .into_iter()
            .map(|workout| {
                let own_days: Vec<WorkoutDay> = days
                    .iter()
                    .filter(|d| d.belongs_to(workout.id))
                    .cloned()
                    .collect();
                let own_exercises: Vec<Exercise> = exercises
                    .iter()
                    .filter(|e| own_days.iter().any(|d| d.id == e.workout_day_id))
                    .cloned()
                    .collect();
                WorkoutTree::assemble(workout, own_days, own_exercises)
            })
            .collect())
    }
}
