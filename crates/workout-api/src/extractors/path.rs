//! Path and query parameter extractors
//!
//! Ids arrive as decimal path segments and deserialize straight into the
//! typed ids of `workout-core`. Rejections become `INVALID_PATH_PARAMETER`
//! or `INVALID_QUERY_PARAMETER` instead of axum's plain-text bodies.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};
use workout_core::{ConnectionId, ExerciseId, UserId, WorkoutDayId, WorkoutId};

use crate::response::ApiError;

/// Path parameters with the error mapping of this API
#[derive(Debug, Clone)]
pub struct TypedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for TypedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(TypedPath(inner))
    }
}

/// Query string parameters with the error mapping of this API
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(QueryParams(inner))
    }
}

/// `/users/:user_id`
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: UserId,
}

/// `/instructors/students/:student_id` and `/workouts/students/:student_id`
#[derive(Debug, Deserialize)]
pub struct StudentIdPath {
    pub student_id: UserId,
}

/// `/students/instructors/:instructor_id`
#[derive(Debug, Deserialize)]
pub struct InstructorIdPath {
    pub instructor_id: UserId,
}

/// `/students/invitations/:invitation_id/...`
#[derive(Debug, Deserialize)]
pub struct InvitationIdPath {
    pub invitation_id: ConnectionId,
}

/// `/workouts/:workout_id`
#[derive(Debug, Deserialize)]
pub struct WorkoutIdPath {
    pub workout_id: WorkoutId,
}

/// `/workouts/:workout_id/days/:day_id`
#[derive(Debug, Deserialize)]
pub struct DayPath {
    pub workout_id: WorkoutId,
    pub day_id: WorkoutDayId,
}

/// `/workouts/:workout_id/days/:day_id/exercises/:exercise_id`
#[derive(Debug, Deserialize)]
pub struct ExercisePath {
    pub workout_id: WorkoutId,
    pub day_id: WorkoutDayId,
    pub exercise_id: ExerciseId,
}
