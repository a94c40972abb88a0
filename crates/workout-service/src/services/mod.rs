//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod access;
pub mod auth;
pub mod context;
pub mod error;
pub mod invitation;
pub mod progress;
pub mod roster;
pub mod statistics;
pub mod user;
pub mod workout;

// Re-export all services for convenience
pub use access::AccessGuard;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invitation::InvitationService;
pub use progress::ProgressService;
pub use roster::RosterService;
pub use statistics::StatisticsService;
pub use user::UserService;
pub use workout::WorkoutService;
