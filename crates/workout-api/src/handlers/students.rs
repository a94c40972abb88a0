//! Student handlers
//!
//! Answering invitations, browsing instructors, the student's own workouts
//! and progress tracking.

use axum::{extract::State, Json};
use chrono::Utc;
use workout_core::value_objects::start_of_week;
use workout_service::dto::{
    CurrentTrainerResponse, DailyStatsQuery, DailyStatsResponse, ExerciseStatusResponse,
    InstructorSummaryResponse, InvitationResponse, MarkExerciseRequest,
    PendingInvitationResponse, UpdateStudentProfileRequest, UserResponse, WeeklyStatsQuery,
    WeeklyStatsResponse, WorkoutDetailResponse, WorkoutSummaryResponse,
};
use workout_service::{InvitationService, ProgressService, UserService, WorkoutService};

use crate::extractors::{
    AuthUser, InstructorIdPath, InvitationIdPath, QueryParams, TypedPath, ValidatedJson,
};
use crate::response::ApiResult;
use crate::state::AppState;

// === Invitations ===

/// Pending invitations addressed to the caller
///
/// GET /students/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PendingInvitationResponse>>> {
    let service = InvitationService::new(state.service_context());
    let invitations = service.list_pending_for_student(auth.user_id).await?;
    Ok(Json(invitations))
}

/// POST /students/invitations/{invitation_id}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<InvitationIdPath>,
) -> ApiResult<Json<InvitationResponse>> {
    let service = InvitationService::new(state.service_context());
    let invitation = service.accept(path.invitation_id, auth.user_id).await?;
    Ok(Json(invitation))
}

/// POST /students/invitations/{invitation_id}/reject
pub async fn reject_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<InvitationIdPath>,
) -> ApiResult<Json<InvitationResponse>> {
    let service = InvitationService::new(state.service_context());
    let invitation = service.reject(path.invitation_id, auth.user_id).await?;
    Ok(Json(invitation))
}

// === Instructors ===

/// Every instructor with their accepted-student count
///
/// GET /students/instructors
pub async fn list_instructors(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<InstructorSummaryResponse>>> {
    let service = InvitationService::new(state.service_context());
    let instructors = service.list_instructors(auth.user_id).await?;
    Ok(Json(instructors))
}

/// GET /students/instructors/{instructor_id}
pub async fn get_instructor(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<InstructorIdPath>,
) -> ApiResult<Json<InstructorSummaryResponse>> {
    let service = InvitationService::new(state.service_context());
    let instructor = service
        .get_instructor(auth.user_id, path.instructor_id)
        .await?;
    Ok(Json(instructor))
}

/// The instructor the caller is connected to, if any
///
/// GET /students/current-trainer
pub async fn current_trainer(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentTrainerResponse>> {
    let service = InvitationService::new(state.service_context());
    let trainer = service.current_trainer(auth.user_id).await?;
    Ok(Json(trainer))
}

/// PUT /students/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateStudentProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.update_student_profile(auth.user_id, request).await?;
    Ok(Json(user))
}

// === Workouts ===

/// GET /students/workouts
pub async fn list_workouts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<WorkoutSummaryResponse>>> {
    let service = WorkoutService::new(state.service_context());
    let workouts = service
        .list_student_workouts(auth.user_id, auth.user_id)
        .await?;
    Ok(Json(workouts))
}

/// The active workout, or `null` when there is none
///
/// GET /students/workouts/active
pub async fn get_active_workout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Option<WorkoutDetailResponse>>> {
    let service = WorkoutService::new(state.service_context());
    let workout = service.get_active_workout(auth.user_id).await?;
    Ok(Json(workout))
}

// === Progress ===

/// Record a completed or skipped exercise
///
/// POST /students/progress
pub async fn mark_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<MarkExerciseRequest>,
) -> ApiResult<Json<ExerciseStatusResponse>> {
    let service = ProgressService::new(state.service_context());
    let today = Utc::now().date_naive();
    let status = service.mark_exercise(auth.user_id, request, today).await?;
    Ok(Json(status))
}

/// GET /students/progress/daily?date=
pub async fn daily_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<DailyStatsQuery>,
) -> ApiResult<Json<DailyStatsResponse>> {
    let service = ProgressService::new(state.service_context());
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let stats = service.daily_stats(auth.user_id, date).await?;
    Ok(Json(stats))
}

/// Seven days from `week_start`, defaulting to the Sunday of this week
///
/// GET /students/progress/weekly?week_start=
pub async fn weekly_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<WeeklyStatsQuery>,
) -> ApiResult<Json<WeeklyStatsResponse>> {
    let service = ProgressService::new(state.service_context());
    let week_start = query
        .week_start
        .unwrap_or_else(|| start_of_week(Utc::now().date_naive()));
    let stats = service.weekly_stats(auth.user_id, week_start).await?;
    Ok(Json(stats))
}
