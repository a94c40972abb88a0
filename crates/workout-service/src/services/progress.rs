//! Progress service
//!
//! Students record exercise outcomes and read their daily and weekly
//! completion against the active workout.

use chrono::NaiveDate;
use tracing::{info, instrument};
use workout_core::entities::{NewExerciseStatus, WorkoutTree};
use workout_core::error::DomainError;
use workout_core::stats::{week_end_exclusive, DailyProgress, WeeklyProgress};
use workout_core::value_objects::{UserId, UserRole};

use crate::dto::{DailyStatsResponse, ExerciseStatusResponse, MarkExerciseRequest, WeeklyStatsResponse};

use super::access::AccessGuard;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Progress service
pub struct ProgressService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgressService<'a> {
    /// Create a new ProgressService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a completion or skip, replacing the outcome already stored
    /// for the same exercise and date
    #[instrument(skip(self, request), fields(exercise_id = %request.exercise_id))]
    pub async fn mark_exercise(
        &self,
        student_id: UserId,
        request: MarkExerciseRequest,
        today: NaiveDate,
    ) -> ServiceResult<ExerciseStatusResponse> {
        AccessGuard::new(self.ctx)
            .require_role(student_id, UserRole::Student)
            .await?;

        let owner = self
            .ctx
            .exercise_repo()
            .find_student_of(request.exercise_id)
            .await?;
        if owner != Some(student_id) {
            return Err(DomainError::ExerciseNotFound(request.exercise_id).into());
        }

        let status = self
            .ctx
            .exercise_status_repo()
            .upsert(&NewExerciseStatus {
                exercise_id: request.exercise_id,
                student_id,
                date: request.date.unwrap_or(today),
                status: request.status,
            })
            .await?;

        info!(
            student_id = %student_id,
            exercise_id = %status.exercise_id,
            date = %status.date,
            status = %status.status,
            "Exercise status recorded"
        );

        Ok(ExerciseStatusResponse::from(&status))
    }

    /// Outcome counts for one date
    #[instrument(skip(self))]
    pub async fn daily_stats(
        &self,
        student_id: UserId,
        date: NaiveDate,
    ) -> ServiceResult<DailyStatsResponse> {
        AccessGuard::new(self.ctx)
            .require_role(student_id, UserRole::Student)
            .await?;

        let plan = self.active_tree(student_id).await?;
        let statuses = self
            .ctx
            .exercise_status_repo()
            .find_by_student_on(student_id, date)
            .await?;

        let progress = DailyProgress::compute(date, plan.as_ref(), &statuses);
        Ok(DailyStatsResponse::from(&progress))
    }

    /// Seven days of outcome counts starting at `week_start`
    #[instrument(skip(self))]
    pub async fn weekly_stats(
        &self,
        student_id: UserId,
        week_start: NaiveDate,
    ) -> ServiceResult<WeeklyStatsResponse> {
        AccessGuard::new(self.ctx)
            .require_role(student_id, UserRole::Student)
            .await?;

        let out_of_range =
            || ServiceError::invalid_argument(format!("week_start {week_start} is out of range"));
        let week_end = week_end_exclusive(week_start).ok_or_else(out_of_range)?;

        let plan = self.active_tree(student_id).await?;
        let statuses = self
            .ctx
            .exercise_status_repo()
            .find_by_student_between(student_id, week_start, week_end)
            .await?;

        let progress =
            WeeklyProgress::compute(week_start, plan.as_ref(), &statuses).ok_or_else(out_of_range)?;
        Ok(WeeklyStatsResponse::from(&progress))
    }

    async fn active_tree(&self, student_id: UserId) -> ServiceResult<Option<WorkoutTree>> {
        let repo = self.ctx.workout_repo();
        match repo.find_active_by_student(student_id).await? {
            Some(active) => Ok(repo.load_tree(active.id).await?),
            None => Ok(None),
        }
    }
}
