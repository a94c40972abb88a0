//! Workout handlers
//!
//! Instructors build workouts for connected students: the workout itself,
//! its weekdays and the ordered exercises of each day.

use axum::{extract::State, Json};
use workout_service::dto::{
    AddExerciseRequest, AddWorkoutDayRequest, CreateWorkoutRequest, ExerciseResponse,
    ReorderExercisesRequest, UpdateExerciseRequest, UpdateWorkoutRequest, WorkoutDayResponse,
    WorkoutDetailResponse, WorkoutSummaryResponse,
};
use workout_service::WorkoutService;

use crate::extractors::{
    AuthUser, DayPath, ExercisePath, StudentIdPath, TypedPath, ValidatedJson, WorkoutIdPath,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

// === Workouts ===

/// Create a workout for a connected student; it becomes the active one
///
/// POST /workouts
pub async fn create_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateWorkoutRequest>,
) -> ApiResult<Created<Json<WorkoutDetailResponse>>> {
    let service = WorkoutService::new(state.service_context());
    let workout = service.create_workout(auth.user_id, request).await?;
    Ok(Created(Json(workout)))
}

/// Workouts of one student, for the student or a connected instructor
///
/// GET /workouts/students/{student_id}
pub async fn list_student_workouts(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<StudentIdPath>,
) -> ApiResult<Json<Vec<WorkoutSummaryResponse>>> {
    let service = WorkoutService::new(state.service_context());
    let workouts = service
        .list_student_workouts(auth.user_id, path.student_id)
        .await?;
    Ok(Json(workouts))
}

/// GET /workouts/{workout_id}
pub async fn get_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<WorkoutIdPath>,
) -> ApiResult<Json<WorkoutDetailResponse>> {
    let service = WorkoutService::new(state.service_context());
    let workout = service.get_workout(auth.user_id, path.workout_id).await?;
    Ok(Json(workout))
}

/// PATCH /workouts/{workout_id}
pub async fn update_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<WorkoutIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateWorkoutRequest>,
) -> ApiResult<Json<WorkoutDetailResponse>> {
    let service = WorkoutService::new(state.service_context());
    let workout = service
        .update_workout(auth.user_id, path.workout_id, request)
        .await?;
    Ok(Json(workout))
}

/// DELETE /workouts/{workout_id}
pub async fn delete_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<WorkoutIdPath>,
) -> ApiResult<NoContent> {
    let service = WorkoutService::new(state.service_context());
    service.delete_workout(auth.user_id, path.workout_id).await?;
    Ok(NoContent)
}

// === Days ===

/// POST /workouts/{workout_id}/days
pub async fn add_day(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<WorkoutIdPath>,
    ValidatedJson(request): ValidatedJson<AddWorkoutDayRequest>,
) -> ApiResult<Created<Json<WorkoutDayResponse>>> {
    let service = WorkoutService::new(state.service_context());
    let day = service
        .add_day(auth.user_id, path.workout_id, request)
        .await?;
    Ok(Created(Json(day)))
}

/// DELETE /workouts/{workout_id}/days/{day_id}
pub async fn delete_day(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<DayPath>,
) -> ApiResult<NoContent> {
    let service = WorkoutService::new(state.service_context());
    service
        .delete_day(auth.user_id, path.workout_id, path.day_id)
        .await?;
    Ok(NoContent)
}

// === Exercises ===

/// Append an exercise to the end of a day
///
/// POST /workouts/{workout_id}/days/{day_id}/exercises
pub async fn add_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<DayPath>,
    ValidatedJson(request): ValidatedJson<AddExerciseRequest>,
) -> ApiResult<Created<Json<ExerciseResponse>>> {
    let service = WorkoutService::new(state.service_context());
    let exercise = service
        .add_exercise(auth.user_id, path.workout_id, path.day_id, request)
        .await?;
    Ok(Created(Json(exercise)))
}

/// PATCH /workouts/{workout_id}/days/{day_id}/exercises/{exercise_id}
pub async fn update_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<ExercisePath>,
    ValidatedJson(request): ValidatedJson<UpdateExerciseRequest>,
) -> ApiResult<Json<ExerciseResponse>> {
    let service = WorkoutService::new(state.service_context());
    let exercise = service
        .update_exercise(
            auth.user_id,
            path.workout_id,
            path.day_id,
            path.exercise_id,
            request,
        )
        .await?;
    Ok(Json(exercise))
}

/// DELETE /workouts/{workout_id}/days/{day_id}/exercises/{exercise_id}
pub async fn delete_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<ExercisePath>,
) -> ApiResult<NoContent> {
    let service = WorkoutService::new(state.service_context());
    service
        .delete_exercise(auth.user_id, path.workout_id, path.day_id, path.exercise_id)
        .await?;
    Ok(NoContent)
}

/// Rewrite the order of a day's exercises
///
/// PUT /workouts/{workout_id}/days/{day_id}/exercises/reorder
pub async fn reorder_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    TypedPath(path): TypedPath<DayPath>,
    ValidatedJson(request): ValidatedJson<ReorderExercisesRequest>,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    let service = WorkoutService::new(state.service_context());
    let exercises = service
        .reorder_exercises(auth.user_id, path.workout_id, path.day_id, request)
        .await?;
    Ok(Json(exercises))
}
