//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Datelike, Utc};
use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn register(server: &TestServer, request: &RegisterRequest) -> AuthResponse {
    let response = server.post("/auth/register", request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Instructor and student with an accepted connection
async fn connected_pair(server: &TestServer) -> (AuthResponse, AuthResponse) {
    let instructor = register(server, &RegisterRequest::instructor()).await;
    let student = register(server, &RegisterRequest::student()).await;

    let response = server
        .post_auth(
            "/instructors/students",
            &instructor.access_token,
            &json!({ "student_id": student.user.id }),
        )
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/students/invitations/{}/accept", invitation.id),
            &student.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    (instructor, student)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::student();
    let auth = register(&server, &request).await;

    assert_eq!(auth.user.name, request.name);
    assert_eq!(auth.user.role, "student");
    assert_eq!(auth.user.age, Some(27));
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::instructor();
    register(&server, &request).await;

    let mut again = request.clone();
    again.email = again.email.to_uppercase();
    let response = server.post("/auth/register", &again).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_invalid_body() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::student();
    request.email = "not-an-email".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::instructor();
    register(&server, &register_req).await;

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&register_req))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, register_req.email);
    assert_eq!(auth.user.role, "instructor");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::student();
    register(&server, &register_req).await;

    let wrong_password = LoginRequest {
        email: register_req.email.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = server.post("/auth/login", &wrong_password).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = LoginRequest {
        email: format!("nobody.{}@example.com", unique_suffix()),
        password: "TestPass123!".to_string(),
    };
    let response = server.post("/auth/login", &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, &RegisterRequest::student()).await;

    let response = server
        .post(
            "/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);

    // An access token is not a refresh token
    let response = server
        .post(
            "/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.access_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_missing_and_invalid_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users/@me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/users/@me", "garbage").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_current_user_roundtrip() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, &RegisterRequest::student()).await;

    let response = server
        .patch_auth("/users/@me", &auth.access_token, &json!({ "name": "Renamed Student" }))
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Renamed Student");

    let response = server.get_auth("/users/@me", &auth.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.name, "Renamed Student");

    let response = server
        .get_auth(&format!("/users/{}", auth.user.id), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_search_users() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let student_req = RegisterRequest::student();
    let student = register(&server, &student_req).await;
    let instructor = register(&server, &RegisterRequest::instructor()).await;

    let response = server
        .get_auth(
            &format!("/users/search?q={}", student_req.email),
            &instructor.access_token,
        )
        .await
        .unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.iter().any(|u| u.id == student.user.id));

    let response = server
        .get_auth("/users/search?q=%20", &instructor.access_token)
        .await
        .unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_delete_account() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (instructor, student) = connected_pair(&server).await;

    let response = server
        .delete_auth("/users/@me", &student.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/instructors/students", &instructor.access_token)
        .await
        .unwrap();
    let roster: Vec<StudentSummaryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(roster.is_empty());
}

#[tokio::test]
async fn test_invalid_path_parameter() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server, &RegisterRequest::student()).await;

    let response = server
        .get_auth("/users/not-a-number", &auth.access_token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Invitation Tests
// ============================================================================

#[tokio::test]
async fn test_invitation_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let instructor = register(&server, &RegisterRequest::instructor()).await;
    let student_req = RegisterRequest::student();
    let student = register(&server, &student_req).await;

    // Invite by email
    let response = server
        .post_auth(
            "/instructors/students",
            &instructor.access_token,
            &json!({ "email": student_req.email }),
        )
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(invitation.status, "pending");
    assert_eq!(invitation.student_id, student.user.id);

    // A second pending invitation is a conflict
    let response = server
        .post_auth(
            "/instructors/students",
            &instructor.access_token,
            &json!({ "student_id": student.user.id }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "INVITATION_ALREADY_PENDING");

    // The student sees it with the instructor card
    let response = server
        .get_auth("/students/invitations", &student.access_token)
        .await
        .unwrap();
    let pending: Vec<PendingInvitationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, invitation.id);
    assert_eq!(pending[0].instructor.id, instructor.user.id);

    // Accept
    let response = server
        .post_auth(
            &format!("/students/invitations/{}/accept", invitation.id),
            &student.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let accepted: InvitationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "accepted");
    assert!(accepted.connected_at.is_some());

    // Accepting twice is an invalid state
    let response = server
        .post_auth(
            &format!("/students/invitations/{}/accept", invitation.id),
            &student.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVITATION_NOT_PENDING");

    // Re-inviting a connected student answers 200 without a new record
    let response = server
        .post_auth(
            "/instructors/students",
            &instructor.access_token,
            &json!({ "student_id": student.user.id }),
        )
        .await
        .unwrap();
    let existing: InvitationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(existing.id, invitation.id);

    // Roster entry without a workout
    let response = server
        .get_auth("/instructors/students", &instructor.access_token)
        .await
        .unwrap();
    let roster: Vec<StudentSummaryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, student.user.id);
    assert_eq!(roster[0].active_workout_id, 0);
    assert_eq!(roster[0].active_workout_name, "No active workout");

    // The student's view of the connection
    let response = server
        .get_auth("/students/current-trainer", &student.access_token)
        .await
        .unwrap();
    let trainer: CurrentTrainerResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(trainer.has_trainer);
    assert_eq!(trainer.trainer.unwrap().id, instructor.user.id);

    let response = server
        .get_auth(
            &format!("/students/instructors/{}", instructor.user.id),
            &student.access_token,
        )
        .await
        .unwrap();
    let card: InstructorSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(card.students_count, 1);
}

#[tokio::test]
async fn test_reject_and_reinvite() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let instructor = register(&server, &RegisterRequest::instructor()).await;
    let student = register(&server, &RegisterRequest::student()).await;
    let invite = json!({ "student_id": student.user.id });

    let response = server
        .post_auth("/instructors/students", &instructor.access_token, &invite)
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/students/invitations/{}/reject", invitation.id),
            &student.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let rejected: InvitationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.status, "rejected");

    // A rejected record does not block a new invitation
    let response = server
        .post_auth("/instructors/students", &instructor.access_token, &invite)
        .await
        .unwrap();
    let second: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_ne!(second.id, invitation.id);

    let response = server
        .get_auth("/instructors/invitations", &instructor.access_token)
        .await
        .unwrap();
    let sent: Vec<InvitationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sent.len(), 2);
}

#[tokio::test]
async fn test_invite_unknown_student() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let instructor = register(&server, &RegisterRequest::instructor()).await;
    let other = register(&server, &RegisterRequest::instructor()).await;

    let response = server
        .post_auth(
            "/instructors/students",
            &instructor.access_token,
            &json!({ "email": format!("ghost.{}@example.com", unique_suffix()) }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_STUDENT");

    // Instructors cannot be invited as students
    let response = server
        .post_auth(
            "/instructors/students",
            &instructor.access_token,
            &json!({ "student_id": other.user.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth("/instructors/students", &instructor.access_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_role_checks() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let instructor = register(&server, &RegisterRequest::instructor()).await;
    let student = register(&server, &RegisterRequest::student()).await;

    let response = server
        .get_auth("/instructors/students", &student.access_token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "ROLE_REQUIRED");

    let response = server
        .get_auth("/students/invitations", &instructor.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_disconnect() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (instructor, student) = connected_pair(&server).await;
    let path = format!("/instructors/students/{}", student.user.id);

    let response = server.delete_auth(&path, &instructor.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &instructor.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&path, &instructor.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_CONNECTION");

    let response = server
        .get_auth("/students/current-trainer", &student.access_token)
        .await
        .unwrap();
    let trainer: CurrentTrainerResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!trainer.has_trainer);
}

// ============================================================================
// Workout Tests
// ============================================================================

#[tokio::test]
async fn test_workout_requires_connection() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let instructor = register(&server, &RegisterRequest::instructor()).await;
    let student = register(&server, &RegisterRequest::student()).await;

    let response = server
        .post_auth(
            "/workouts",
            &instructor.access_token,
            &json!({ "student_id": student.user.id, "name": "Full body" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_workout_building_and_progress() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (instructor, student) = connected_pair(&server).await;
    let token = &instructor.access_token;

    // Workout
    let response = server
        .post_auth(
            "/workouts",
            token,
            &json!({ "student_id": student.user.id, "name": "Full body" }),
        )
        .await
        .unwrap();
    let workout: WorkoutDetailResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(workout.is_active);
    assert_eq!(workout.student_id, student.user.id);

    // Today's weekday, 0 = Sunday
    let today = Utc::now().date_naive();
    let day_of_week = i16::try_from(today.weekday().num_days_from_sunday()).unwrap();
    let response = server
        .post_auth(
            &format!("/workouts/{}/days", workout.id),
            token,
            &json!({ "day_of_week": day_of_week }),
        )
        .await
        .unwrap();
    let day: WorkoutDayResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(day.day_of_week, day_of_week);

    // The same weekday twice is a conflict
    let response = server
        .post_auth(
            &format!("/workouts/{}/days", workout.id),
            token,
            &json!({ "day_of_week": day_of_week }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DUPLICATE_WORKOUT_DAY");

    // Exercises append in order
    let exercises_path = format!("/workouts/{}/days/{}/exercises", workout.id, day.id);
    let mut ids = Vec::new();
    for name in ["squat", "lunge", "plank"] {
        let response = server
            .post_auth(&exercises_path, token, &AddExerciseRequest::named(name))
            .await
            .unwrap();
        let exercise: ExerciseResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(exercise.order, i32::try_from(ids.len()).unwrap());
        ids.push(exercise.id);
    }

    // Reorder: plank first, the unlisted ones keep their relative order
    let response = server
        .put_auth(
            &format!("{exercises_path}/reorder"),
            token,
            &json!({ "exercise_ids": [ids[2]] }),
        )
        .await
        .unwrap();
    let reordered: Vec<ExerciseResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let names: Vec<&str> = reordered.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["plank", "squat", "lunge"]);
    let orders: Vec<i32> = reordered.iter().map(|e| e.order).collect();
    assert_eq!(orders, [0, 1, 2]);

    // Update a prescription
    let response = server
        .patch_auth(
            &format!("{exercises_path}/{}", ids[0]),
            token,
            &json!({ "sets": "5", "weight": 80.0 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The student sees the active workout
    let response = server
        .get_auth("/students/workouts/active", &student.access_token)
        .await
        .unwrap();
    let active: Option<WorkoutDetailResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let active = active.expect("active workout");
    assert_eq!(active.id, workout.id);
    assert_eq!(active.days[0].exercises.len(), 3);

    // Progress
    for (id, status) in [(ids[0], "completed"), (ids[1], "skipped")] {
        let response = server
            .post_auth(
                "/students/progress",
                &student.access_token,
                &json!({ "exercise_id": id, "status": status }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .get_auth("/students/progress/daily", &student.access_token)
        .await
        .unwrap();
    let daily: DailyStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(daily.date, today.to_string());
    assert_eq!(daily.completed_exercises, 1);
    assert_eq!(daily.skipped_exercises, 1);
    assert_eq!(daily.total_exercises, 3);
    assert!((daily.completion_rate - 33.33).abs() < 1e-9);

    let response = server
        .get_auth("/students/progress/weekly", &student.access_token)
        .await
        .unwrap();
    let weekly: WeeklyStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(weekly.daily_stats.len(), 7);
    assert_eq!(weekly.total_exercises, 3);

    // Roster and dashboard reflect the progress
    let response = server
        .get_auth(&format!("/instructors/students/{}", student.user.id), token)
        .await
        .unwrap();
    let summary: StudentSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.active_workout_id, workout.id);
    assert_eq!(summary.completed_exercises_today, 1);
    assert_eq!(summary.total_exercises_today, 3);

    let response = server.get_auth("/instructors/statistics", token).await.unwrap();
    let stats: InstructorStatisticsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.students.total, 1);
    assert_eq!(stats.students.active, 1);
    assert_eq!(stats.workouts.total, 1);

    // Deleting an exercise compacts the order
    let response = server
        .delete_auth(&format!("{exercises_path}/{}", ids[2]), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/workouts/{}", workout.id), token)
        .await
        .unwrap();
    let detail: WorkoutDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let orders: Vec<i32> = detail.days[0].exercises.iter().map(|e| e.order).collect();
    assert_eq!(orders, [0, 1]);
}

#[tokio::test]
async fn test_new_workout_replaces_active_one() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (instructor, student) = connected_pair(&server).await;

    for name in ["Block A", "Block B"] {
        let response = server
            .post_auth(
                "/workouts",
                &instructor.access_token,
                &json!({ "student_id": student.user.id, "name": name }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth(
            &format!("/workouts/students/{}", student.user.id),
            &instructor.access_token,
        )
        .await
        .unwrap();
    let workouts: Vec<WorkoutSummaryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts.iter().filter(|w| w.is_active).count(), 1);

    let response = server
        .get_auth("/students/workouts", &student.access_token)
        .await
        .unwrap();
    let own: Vec<WorkoutSummaryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(own.len(), 2);
}

#[tokio::test]
async fn test_foreign_workout_is_hidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (instructor, student) = connected_pair(&server).await;
    let stranger = register(&server, &RegisterRequest::instructor()).await;

    let response = server
        .post_auth(
            "/workouts",
            &instructor.access_token,
            &json!({ "student_id": student.user.id, "name": "Private" }),
        )
        .await
        .unwrap();
    let workout: WorkoutDetailResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/workouts/{}", workout.id);
    let response = server.get_auth(&path, &stranger.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_WORKOUT");

    let response = server.delete_auth(&path, &stranger.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth(&path, &student.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_progress_query_validation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let student = register(&server, &RegisterRequest::student()).await;

    let response = server
        .get_auth("/students/progress/daily?date=yesterday", &student.access_token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");

    let response = server
        .get_auth("/students/progress/weekly?week_start=2026-03-15", &student.access_token)
        .await
        .unwrap();
    let weekly: WeeklyStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(weekly.week_start_date, "2026-03-15");
    assert_eq!(weekly.total_exercises, 0);

    // A week running past the last calendar date is rejected, not computed
    let response = server
        .get_auth(
            "/students/progress/weekly?week_start=%2B262142-12-30",
            &student.access_token,
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_ARGUMENT");

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
