//! Instructor handlers
//!
//! Invitations, the student roster, the statistics dashboard and the
//! instructor's public profile. Role checks live in the services.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use workout_service::dto::{
    InstructorStatisticsResponse, InvitationResponse, InviteStudentRequest,
    StudentSummaryResponse, UpdateInstructorProfileRequest, UserResponse,
};
use workout_service::{InvitationService, RosterService, StatisticsService, UserService};

use crate::extractors::{AuthUser, StudentIdPath, TypedPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Invite a student by id or email
///
/// POST /instructors/students
///
/// Answers 201 when a pending invitation was stored and 200 when the pair
/// was already connected.
pub async fn invite_student(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<InviteStudentRequest>,
) -> ApiResult<(StatusCode, Json<InvitationResponse>)> {
    let service = InvitationService::new(state.service_context());
    let outcome = service.invite(auth.user_id, request).await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.into_inner())))
}

/// Connected students with today's progress
///
/// GET /instructors/students
pub async fn list_students(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<StudentSummaryResponse>>> {
    let service = RosterService::new(state.service_context());
    let today = Utc::now().date_naive();
    let students = service.list_students(auth.user_id, today).await?;
    Ok(Json(students))
}

/// One connected student
///
/// GET /instructors/students/{student_id}
pub async fn get_student(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<StudentIdPath>,
) -> ApiResult<Json<StudentSummaryResponse>> {
    let service = RosterService::new(state.service_context());
    let today = Utc::now().date_naive();
    let student = service
        .get_student(auth.user_id, path.student_id, today)
        .await?;
    Ok(Json(student))
}

/// Remove every relationship record with a student
///
/// DELETE /instructors/students/{student_id}
pub async fn disconnect_student(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<StudentIdPath>,
) -> ApiResult<NoContent> {
    let service = InvitationService::new(state.service_context());
    service.disconnect(auth.user_id, path.student_id).await?;
    Ok(NoContent)
}

/// Every invitation the instructor has sent
///
/// GET /instructors/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let service = InvitationService::new(state.service_context());
    let invitations = service.list_for_instructor(auth.user_id).await?;
    Ok(Json(invitations))
}

/// Dashboard figures
///
/// GET /instructors/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<InstructorStatisticsResponse>> {
    let service = StatisticsService::new(state.service_context());
    let stats = service
        .instructor_statistics(auth.user_id, Utc::now())
        .await?;
    Ok(Json(stats))
}

/// PUT /instructors/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateInstructorProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service
        .update_instructor_profile(auth.user_id, request)
        .await?;
    Ok(Json(user))
}
