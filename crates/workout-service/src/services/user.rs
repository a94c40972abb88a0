//! User service
//!
//! Handles profile reads and updates, search, and account deletion.

use tracing::{info, instrument, warn};
use workout_common::auth::{hash_password, validate_password_strength, verify_password};
use workout_core::value_objects::{UserId, UserRole};

use crate::dto::{
    PublicUserResponse, UpdateInstructorProfileRequest, UpdateStudentProfileRequest,
    UpdateUserRequest, UserResponse,
};

use super::access::AccessGuard;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maximum number of search results
const SEARCH_LIMIT: i64 = 20;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn guard(&self) -> AccessGuard<'a> {
        AccessGuard::new(self.ctx)
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<PublicUserResponse> {
        let user = self.guard().load_user(user_id).await?;
        Ok(PublicUserResponse::from(&user))
    }

    /// Get current authenticated user (full profile)
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = self.guard().load_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Update the common profile fields and optionally the password
    #[instrument(skip(self, request))]
    pub async fn update_current_user(
        &self,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.guard().load_user(user_id).await?;

        if let Some(new_password) = request.new_password.as_deref() {
            let Some(current) = request.current_password.as_deref() else {
                return Err(ServiceError::invalid_argument(
                    "Current password is required to set a new password",
                ));
            };

            let stored = self
                .ctx
                .user_repo()
                .get_password_hash(user_id)
                .await?
                .ok_or_else(|| ServiceError::internal("Password hash missing"))?;
            if !verify_password(current, &stored)? {
                warn!(user_id = %user_id, "Password change with wrong current password");
                return Err(ServiceError::invalid_argument("Current password is incorrect"));
            }

            validate_password_strength(new_password)?;
            let hash = hash_password(new_password)?;
            self.ctx.user_repo().update_password(user_id, &hash).await?;
            info!(user_id = %user_id, "Password changed");
        }

        let mut changed = false;

        if let Some(name) = request.name.as_deref().map(str::trim) {
            if !name.is_empty() && name != user.name {
                user.name = name.to_string();
                changed = true;
            }
        }
        if let Some(age) = request.age {
            user.age = Some(age);
            changed = true;
        }
        if let Some(gender) = request.gender {
            user.gender = Some(gender);
            changed = true;
        }
        if let Some(description) = request.description {
            user.description = Some(description);
            changed = true;
        }

        if changed {
            user.touch();
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "User profile updated");
        }

        Ok(UserResponse::from(&user))
    }

    /// Replace the student body metrics and goals
    #[instrument(skip(self, request))]
    pub async fn update_student_profile(
        &self,
        user_id: UserId,
        request: UpdateStudentProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.guard().require_role(user_id, UserRole::Student).await?;

        let name = request.name.trim();
        if !name.is_empty() {
            user.name = name.to_string();
        }
        user.gender = Some(request.gender);
        user.age = request.age.or(user.age);
        user.height = request.height;
        user.weight = request.weight;
        user.body_type = request.body_type;
        user.health_conditions = request.health_conditions;
        user.goal = request.goal;
        user.observations = request.observations;
        user.touch();

        self.ctx.user_repo().update(&user).await?;
        info!(user_id = %user_id, "Student profile updated");

        Ok(UserResponse::from(&user))
    }

    /// Update instructor credentials; absent fields keep their value
    #[instrument(skip(self, request))]
    pub async fn update_instructor_profile(
        &self,
        user_id: UserId,
        request: UpdateInstructorProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self
            .guard()
            .require_role(user_id, UserRole::Instructor)
            .await?;

        if request.phone.is_some() {
            user.phone = request.phone;
        }
        if request.certifications.is_some() {
            user.certifications = request.certifications;
        }
        if request.specializations.is_some() {
            user.specializations = request.specializations;
        }
        if request.bio.is_some() {
            user.bio = request.bio;
        }
        if request.years_of_experience.is_some() {
            user.years_of_experience = request.years_of_experience;
        }
        if request.social_links_json.is_some() {
            user.social_links_json = request.social_links_json;
        }
        user.touch();

        self.ctx.user_repo().update(&user).await?;
        info!(user_id = %user_id, "Instructor profile updated");

        Ok(UserResponse::from(&user))
    }

    /// Users whose name or email contains `query`
    #[instrument(skip(self))]
    pub async fn search_users(&self, query: &str) -> ServiceResult<Vec<PublicUserResponse>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.ctx.user_repo().search(query, SEARCH_LIMIT).await?;
        Ok(users.iter().map(PublicUserResponse::from).collect())
    }

    /// Delete the account with its relationships, workouts and statuses
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: UserId) -> ServiceResult<()> {
        self.guard().load_user(user_id).await?;
        self.ctx.user_repo().delete_account(user_id).await?;

        info!(user_id = %user_id, "User account deleted");
        Ok(())
    }
}
