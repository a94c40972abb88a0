//! Route definitions
//!
//! All API routes organized by audience and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{auth, health, instructors, students, users, workouts};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately so they
/// skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(instructor_routes())
        .merge(student_routes())
        .merge(workout_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user)
                .patch(users::update_current_user)
                .delete(users::delete_current_user),
        )
        .route("/users/search", get(users::search_users))
        .route("/users/:user_id", get(users::get_user))
}

/// Instructor routes
fn instructor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/instructors/students",
            get(instructors::list_students).post(instructors::invite_student),
        )
        .route(
            "/instructors/students/:student_id",
            get(instructors::get_student).delete(instructors::disconnect_student),
        )
        .route("/instructors/invitations", get(instructors::list_invitations))
        .route("/instructors/statistics", get(instructors::get_statistics))
        .route("/instructors/profile", put(instructors::update_profile))
}

/// Student routes
fn student_routes() -> Router<AppState> {
    Router::new()
        // Invitations
        .route("/students/invitations", get(students::list_invitations))
        .route(
            "/students/invitations/:invitation_id/accept",
            post(students::accept_invitation),
        )
        .route(
            "/students/invitations/:invitation_id/reject",
            post(students::reject_invitation),
        )
        // Instructors
        .route("/students/instructors", get(students::list_instructors))
        .route(
            "/students/instructors/:instructor_id",
            get(students::get_instructor),
        )
        .route("/students/current-trainer", get(students::current_trainer))
        .route("/students/profile", put(students::update_profile))
        // Workouts
        .route("/students/workouts", get(students::list_workouts))
        .route("/students/workouts/active", get(students::get_active_workout))
        // Progress
        .route("/students/progress", post(students::mark_exercise))
        .route("/students/progress/daily", get(students::daily_progress))
        .route("/students/progress/weekly", get(students::weekly_progress))
}

/// Workout routes
fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", post(workouts::create_workout))
        .route(
            "/workouts/students/:student_id",
            get(workouts::list_student_workouts),
        )
        .route(
            "/workouts/:workout_id",
            get(workouts::get_workout)
                .patch(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
        // Days
        .route("/workouts/:workout_id/days", post(workouts::add_day))
        .route(
            "/workouts/:workout_id/days/:day_id",
            delete(workouts::delete_day),
        )
        // Exercises
        .route(
            "/workouts/:workout_id/days/:day_id/exercises",
            post(workouts::add_exercise),
        )
        .route(
            "/workouts/:workout_id/days/:day_id/exercises/reorder",
            put(workouts::reorder_exercises),
        )
        .route(
            "/workouts/:workout_id/days/:day_id/exercises/:exercise_id",
            patch(workouts::update_exercise).delete(workouts::delete_exercise),
        )
}
