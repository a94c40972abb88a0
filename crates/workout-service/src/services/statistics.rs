//! Statistics service
//!
//! Loads the rows behind the instructor dashboard and hands them to the
//! reporting math in `workout_core::stats`.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use workout_core::stats::compute_instructor_statistics;
use workout_core::value_objects::{UserId, UserRole};

use crate::dto::InstructorStatisticsResponse;

use super::access::AccessGuard;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Statistics service
pub struct StatisticsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatisticsService<'a> {
    /// Create a new StatisticsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Student, workout and completion figures anchored at `now`
    #[instrument(skip(self))]
    pub async fn instructor_statistics(
        &self,
        instructor_id: UserId,
        now: DateTime<Utc>,
    ) -> ServiceResult<InstructorStatisticsResponse> {
        AccessGuard::new(self.ctx)
            .require_role(instructor_id, UserRole::Instructor)
            .await?;

        let connections = self
            .ctx
            .connection_repo()
            .find_accepted_by_instructor(instructor_id)
            .await?;
        let mut student_ids: Vec<UserId> = connections.iter().map(|c| c.student_id).collect();
        student_ids.sort_unstable();
        student_ids.dedup();

        let (workouts, statuses) = if student_ids.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (
                self.ctx.workout_repo().find_by_students(&student_ids).await?,
                self.ctx
                    .exercise_status_repo()
                    .find_by_students(&student_ids)
                    .await?,
            )
        };

        let stats = compute_instructor_statistics(&connections, &workouts, &statuses, now);

        info!(
            instructor_id = %instructor_id,
            students = stats.students.total,
            workouts = stats.workouts.total,
            "Instructor statistics computed"
        );

        Ok(InstructorStatisticsResponse::from(&stats))
    }
}
