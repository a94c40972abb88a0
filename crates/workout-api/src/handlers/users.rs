//! User handlers
//!
//! Account endpoints shared by instructors and students.

use axum::{extract::State, Json};
use workout_service::dto::{PublicUserResponse, SearchUsersQuery, UpdateUserRequest, UserResponse};
use workout_service::UserService;

use crate::extractors::{AuthUser, QueryParams, TypedPath, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update current user
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_current_user(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete the caller's account with everything that belongs to it
///
/// DELETE /users/@me
pub async fn delete_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_account(auth.user_id).await?;
    Ok(NoContent)
}

/// Search users by name or email
///
/// GET /users/search?q=
pub async fn search_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<SearchUsersQuery>,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.search_users(&query.q).await?;
    Ok(Json(users))
}

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    TypedPath(path): TypedPath<UserIdPath>,
) -> ApiResult<Json<PublicUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(path.user_id).await?;
    Ok(Json(response))
}
