//! Invitation service
//!
//! Instructor-initiated invitations, the student's answer, and the ledger of
//! accepted instructor/student connections.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use workout_core::entities::{Connection, NewConnection, User};
use workout_core::error::DomainError;
use workout_core::value_objects::{ConnectionId, InvitationStatus, UserId, UserRole};

use crate::dto::{
    CurrentTrainerResponse, InstructorSummaryResponse, InstructorWithCount, InvitationResponse,
    InvitationWithParties, InviteOutcome, InviteStudentRequest, PendingInvitationResponse,
};

use super::access::AccessGuard;
use super::context::ServiceContext;
use super::error::ServiceResult;

#[derive(Debug, Clone, Copy)]
enum Answer {
    Accept,
    Reject,
}

/// Invitation service
pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvitationService<'a> {
    /// Create a new InvitationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn guard(&self) -> AccessGuard<'a> {
        AccessGuard::new(self.ctx)
    }

    /// Invite a student by id or email
    ///
    /// Inviting a student who is already connected succeeds without storing
    /// anything; a second pending invitation is a conflict.
    #[instrument(skip(self, request))]
    pub async fn invite(
        &self,
        instructor_id: UserId,
        request: InviteStudentRequest,
    ) -> ServiceResult<InviteOutcome> {
        let instructor = self
            .guard()
            .require_role(instructor_id, UserRole::Instructor)
            .await?;
        let student = self.resolve_student(&request).await?;

        let repo = self.ctx.connection_repo();

        if let Some(existing) = repo
            .find_by_pair(student.id, instructor.id, InvitationStatus::Accepted)
            .await?
        {
            info!(instructor_id = %instructor.id, student_id = %student.id, "Student already connected");
            return Ok(InviteOutcome::AlreadyConnected(invitation_response(
                &existing,
                &student,
                &instructor,
            )));
        }

        if repo
            .find_by_pair(student.id, instructor.id, InvitationStatus::Pending)
            .await?
            .is_some()
        {
            warn!(instructor_id = %instructor.id, student_id = %student.id, "Invitation already pending");
            return Err(DomainError::InvitationAlreadyPending.into());
        }

        let connection = repo
            .create(&NewConnection {
                student_id: student.id,
                instructor_id: instructor.id,
                invited_at: Utc::now(),
            })
            .await?;

        info!(
            invitation_id = %connection.id,
            instructor_id = %instructor.id,
            student_id = %student.id,
            "Invitation created"
        );

        Ok(InviteOutcome::Created(invitation_response(
            &connection,
            &student,
            &instructor,
        )))
    }

    async fn resolve_student(&self, request: &InviteStudentRequest) -> ServiceResult<User> {
        let users = self.ctx.user_repo();

        let (found, reference) = match (request.student_id, request.email.as_deref()) {
            (Some(id), _) => (users.find_by_id(id).await?, id.to_string()),
            (None, Some(email)) if !email.trim().is_empty() => {
                let email = email.trim();
                (users.find_by_email(email).await?, email.to_string())
            }
            _ => return Err(DomainError::MissingStudentReference.into()),
        };

        match found {
            Some(user) if user.is_student() => Ok(user),
            _ => Err(DomainError::StudentNotFound(reference).into()),
        }
    }

    /// Accept a pending invitation addressed to the student
    #[instrument(skip(self))]
    pub async fn accept(
        &self,
        invitation_id: ConnectionId,
        student_id: UserId,
    ) -> ServiceResult<InvitationResponse> {
        self.answer(invitation_id, student_id, Answer::Accept).await
    }

    /// Reject a pending invitation addressed to the student
    #[instrument(skip(self))]
    pub async fn reject(
        &self,
        invitation_id: ConnectionId,
        student_id: UserId,
    ) -> ServiceResult<InvitationResponse> {
        self.answer(invitation_id, student_id, Answer::Reject).await
    }

    async fn answer(
        &self,
        invitation_id: ConnectionId,
        student_id: UserId,
        answer: Answer,
    ) -> ServiceResult<InvitationResponse> {
        let student = self
            .guard()
            .require_role(student_id, UserRole::Student)
            .await?;

        let mut connection = self.find_addressed(invitation_id, student_id).await?;

        let now = Utc::now();
        match answer {
            Answer::Accept => connection.accept(now)?,
            Answer::Reject => connection.reject(now)?,
        }

        if !self.ctx.connection_repo().save_response(&connection).await? {
            // Answered or removed since it was read
            let current = self.find_addressed(invitation_id, student_id).await?;
            return Err(DomainError::InvitationNotPending {
                status: current.status,
            }
            .into());
        }

        info!(
            invitation_id = %invitation_id,
            student_id = %student_id,
            instructor_id = %connection.instructor_id,
            status = %connection.status,
            "Invitation answered"
        );

        let instructor = self
            .ctx
            .user_repo()
            .find_by_id(connection.instructor_id)
            .await?;

        Ok(InvitationWithParties {
            connection: &connection,
            student: Some(&student),
            instructor: instructor.as_ref(),
        }
        .into())
    }

    async fn find_addressed(
        &self,
        invitation_id: ConnectionId,
        student_id: UserId,
    ) -> ServiceResult<Connection> {
        self.ctx
            .connection_repo()
            .find_by_id(invitation_id)
            .await?
            .filter(|c| c.is_addressed_to(student_id))
            .ok_or_else(|| DomainError::InvitationNotFound(invitation_id).into())
    }

    /// Remove a student from the instructor's roster
    #[instrument(skip(self))]
    pub async fn disconnect(&self, instructor_id: UserId, student_id: UserId) -> ServiceResult<()> {
        self.guard()
            .require_role(instructor_id, UserRole::Instructor)
            .await?;

        if !self
            .ctx
            .connection_repo()
            .delete_accepted(student_id, instructor_id)
            .await?
        {
            return Err(DomainError::ConnectionNotFound {
                instructor_id,
                student_id,
            }
            .into());
        }

        info!(instructor_id = %instructor_id, student_id = %student_id, "Student disconnected");
        Ok(())
    }

    /// Pending invitations addressed to the student, newest first
    #[instrument(skip(self))]
    pub async fn list_pending_for_student(
        &self,
        student_id: UserId,
    ) -> ServiceResult<Vec<PendingInvitationResponse>> {
        self.guard()
            .require_role(student_id, UserRole::Student)
            .await?;

        let pending = self
            .ctx
            .connection_repo()
            .find_pending_for_student(student_id)
            .await?;
        let instructors = self.users_by_id(pending.iter().map(|c| c.instructor_id)).await?;

        let mut result = Vec::with_capacity(pending.len());
        for connection in &pending {
            let Some(instructor) = instructors.get(&connection.instructor_id) else {
                continue;
            };
            result.push(PendingInvitationResponse {
                id: connection.id,
                invited_at: connection.invited_at,
                instructor: self.instructor_summary(instructor, None).await?,
            });
        }
        Ok(result)
    }

    /// Every record the instructor created, any status, newest first
    #[instrument(skip(self))]
    pub async fn list_for_instructor(
        &self,
        instructor_id: UserId,
    ) -> ServiceResult<Vec<InvitationResponse>> {
        let instructor = self
            .guard()
            .require_role(instructor_id, UserRole::Instructor)
            .await?;

        let records = self
            .ctx
            .connection_repo()
            .find_by_instructor(instructor_id)
            .await?;
        let students = self.users_by_id(records.iter().map(|c| c.student_id)).await?;

        Ok(records
            .iter()
            .map(|c| {
                InvitationWithParties {
                    connection: c,
                    student: students.get(&c.student_id),
                    instructor: Some(&instructor),
                }
                .into()
            })
            .collect())
    }

    /// Instructors the student is connected to, most recent first
    #[instrument(skip(self))]
    pub async fn list_instructors(
        &self,
        student_id: UserId,
    ) -> ServiceResult<Vec<InstructorSummaryResponse>> {
        self.guard()
            .require_role(student_id, UserRole::Student)
            .await?;

        let accepted = self
            .ctx
            .connection_repo()
            .find_accepted_by_student(student_id)
            .await?;
        let instructors = self.users_by_id(accepted.iter().map(|c| c.instructor_id)).await?;

        let mut result = Vec::with_capacity(accepted.len());
        for connection in &accepted {
            if let Some(instructor) = instructors.get(&connection.instructor_id) {
                result.push(
                    self.instructor_summary(instructor, connection.connected_at)
                        .await?,
                );
            }
        }
        Ok(result)
    }

    /// One connected instructor; `NotFound` without an accepted connection
    #[instrument(skip(self))]
    pub async fn get_instructor(
        &self,
        student_id: UserId,
        instructor_id: UserId,
    ) -> ServiceResult<InstructorSummaryResponse> {
        self.guard()
            .require_role(student_id, UserRole::Student)
            .await?;

        let not_found = || DomainError::InstructorNotFound(instructor_id);

        let connection = self
            .ctx
            .connection_repo()
            .find_by_pair(student_id, instructor_id, InvitationStatus::Accepted)
            .await?
            .ok_or_else(not_found)?;
        let instructor = self
            .ctx
            .user_repo()
            .find_by_id(instructor_id)
            .await?
            .ok_or_else(not_found)?;

        self.instructor_summary(&instructor, connection.connected_at)
            .await
    }

    /// The most recently connected instructor, if any
    #[instrument(skip(self))]
    pub async fn current_trainer(&self, student_id: UserId) -> ServiceResult<CurrentTrainerResponse> {
        self.guard()
            .require_role(student_id, UserRole::Student)
            .await?;

        let accepted = self
            .ctx
            .connection_repo()
            .find_accepted_by_student(student_id)
            .await?;

        for connection in &accepted {
            if let Some(instructor) = self
                .ctx
                .user_repo()
                .find_by_id(connection.instructor_id)
                .await?
            {
                return Ok(CurrentTrainerResponse {
                    has_trainer: true,
                    trainer: Some(
                        self.instructor_summary(&instructor, connection.connected_at)
                            .await?,
                    ),
                });
            }
        }

        Ok(CurrentTrainerResponse {
            has_trainer: false,
            trainer: None,
        })
    }

    async fn instructor_summary(
        &self,
        instructor: &User,
        connected_at: Option<DateTime<Utc>>,
    ) -> ServiceResult<InstructorSummaryResponse> {
        let students_count = self
            .ctx
            .connection_repo()
            .count_accepted_students(instructor.id)
            .await?;

        Ok(InstructorWithCount {
            instructor,
            students_count,
            connected_at,
        }
        .into())
    }

    async fn users_by_id(
        &self,
        ids: impl Iterator<Item = UserId>,
    ) -> ServiceResult<HashMap<UserId, User>> {
        let mut ids: Vec<UserId> = ids.collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = self.ctx.user_repo().find_by_ids(&ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

fn invitation_response(
    connection: &Connection,
    student: &User,
    instructor: &User,
) -> InvitationResponse {
    InvitationWithParties {
        connection,
        student: Some(student),
        instructor: Some(instructor),
    }
    .into()
}
