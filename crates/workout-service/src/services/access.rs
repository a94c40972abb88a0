//! Role and relationship checks shared by the use cases
//!
//! Each use case resolves the caller once here instead of checking roles
//! inline.

use tracing::{instrument, warn};
use workout_core::entities::{Connection, User};
use workout_core::error::DomainError;
use workout_core::value_objects::{InvitationStatus, UserId, UserRole};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authorization checks at the use-case boundary
pub struct AccessGuard<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessGuard<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the caller, failing with `NotFound` if the account is gone
    #[instrument(skip(self))]
    pub async fn load_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Load the caller and require `role`, failing with `Forbidden` otherwise
    #[instrument(skip(self))]
    pub async fn require_role(&self, user_id: UserId, role: UserRole) -> ServiceResult<User> {
        let user = self.load_user(user_id).await?;
        if let Err(e) = user.require_role(role) {
            warn!(user_id = %user_id, required = %role, actual = %user.role, "Role check failed");
            return Err(e.into());
        }
        Ok(user)
    }

    /// The accepted record linking the pair, or `NotFound`
    #[instrument(skip(self))]
    pub async fn require_connection(
        &self,
        instructor_id: UserId,
        student_id: UserId,
    ) -> ServiceResult<Connection> {
        self.ctx
            .connection_repo()
            .find_by_pair(student_id, instructor_id, InvitationStatus::Accepted)
            .await?
            .ok_or_else(|| {
                DomainError::ConnectionNotFound {
                    instructor_id,
                    student_id,
                }
                .into()
            })
    }

    /// Whether `viewer` may read the student's workouts: the student
    /// themselves or an instructor connected to them
    #[instrument(skip(self))]
    pub async fn can_view_student(&self, viewer_id: UserId, student_id: UserId) -> ServiceResult<bool> {
        if viewer_id == student_id {
            return Ok(true);
        }
        let viewer = self.load_user(viewer_id).await?;
        if !viewer.is_instructor() {
            return Ok(false);
        }
        Ok(self
            .ctx
            .connection_repo()
            .find_by_pair(student_id, viewer_id, InvitationStatus::Accepted)
            .await?
            .is_some())
    }
}
