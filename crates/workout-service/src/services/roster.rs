//! Roster service
//!
//! The instructor's view of connected students with today's progress.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{debug, instrument};
use workout_core::entities::User;
use workout_core::error::DomainError;
use workout_core::stats::DailyProgress;
use workout_core::value_objects::{UserId, UserRole};

use crate::dto::StudentSummaryResponse;

use super::access::AccessGuard;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Shown in place of a workout name when the student has none active
pub const NO_ACTIVE_WORKOUT: &str = "No active workout";

/// Roster service
pub struct RosterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RosterService<'a> {
    /// Create a new RosterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Summaries of every connected student, most recently connected first
    #[instrument(skip(self))]
    pub async fn list_students(
        &self,
        instructor_id: UserId,
        today: NaiveDate,
    ) -> ServiceResult<Vec<StudentSummaryResponse>> {
        AccessGuard::new(self.ctx)
            .require_role(instructor_id, UserRole::Instructor)
            .await?;

        let accepted = self
            .ctx
            .connection_repo()
            .find_accepted_by_instructor(instructor_id)
            .await?;
        let ids: Vec<UserId> = accepted.iter().map(|c| c.student_id).collect();
        let students = if ids.is_empty() {
            Vec::new()
        } else {
            self.ctx.user_repo().find_by_ids(&ids).await?
        };

        let mut result = Vec::with_capacity(accepted.len());
        for connection in &accepted {
            let Some(student) = students.iter().find(|u| u.id == connection.student_id) else {
                continue;
            };
            result.push(self.summarize(student, connection.connected_at, today).await?);
        }

        debug!(instructor_id = %instructor_id, count = result.len(), "Roster loaded");
        Ok(result)
    }

    /// Summary of one connected student
    #[instrument(skip(self))]
    pub async fn get_student(
        &self,
        instructor_id: UserId,
        student_id: UserId,
        today: NaiveDate,
    ) -> ServiceResult<StudentSummaryResponse> {
        let guard = AccessGuard::new(self.ctx);
        guard
            .require_role(instructor_id, UserRole::Instructor)
            .await?;
        let connection = guard.require_connection(instructor_id, student_id).await?;

        let student = self
            .ctx
            .user_repo()
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| DomainError::StudentNotFound(student_id.to_string()))?;

        self.summarize(&student, connection.connected_at, today)
            .await
    }

    async fn summarize(
        &self,
        student: &User,
        connected_at: Option<DateTime<Utc>>,
        today: NaiveDate,
    ) -> ServiceResult<StudentSummaryResponse> {
        let workouts = self.ctx.workout_repo();
        let tree = match workouts.find_active_by_student(student.id).await? {
            Some(active) => workouts.load_tree(active.id).await?,
            None => None,
        };

        let statuses = self
            .ctx
            .exercise_status_repo()
            .find_by_student_on(student.id, today)
            .await?;
        let progress = DailyProgress::compute(today, tree.as_ref(), &statuses);

        let (active_workout_id, active_workout_name) = tree.as_ref().map_or_else(
            || (0, NO_ACTIVE_WORKOUT.to_string()),
            |t| (t.workout.id.into_inner(), t.workout.name.clone()),
        );

        Ok(StudentSummaryResponse {
            id: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age,
            active_workout_id,
            active_workout_name,
            completed_exercises_today: progress.completed,
            total_exercises_today: tree
                .as_ref()
                .map_or(0, |t| t.exercises_on(today.weekday())),
            connected_at,
        })
    }
}
