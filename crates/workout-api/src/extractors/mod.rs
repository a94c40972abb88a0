//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and typed path/query
//! parameters.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{
    DayPath, ExercisePath, InstructorIdPath, InvitationIdPath, QueryParams, StudentIdPath,
    TypedPath, UserIdPath, WorkoutIdPath,
};
pub use validated::ValidatedJson;
