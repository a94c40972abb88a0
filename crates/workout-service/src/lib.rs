//! # workout-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every use case takes the caller id resolved by the HTTP boundary, checks
//! the caller's role once through [`services::AccessGuard`], and talks to
//! storage only through the repository traits held by [`ServiceContext`].

pub mod dto;
pub mod services;

#[cfg(test)]
mod test_support;

pub use services::{
    AccessGuard, AuthService, InvitationService, ProgressService, RosterService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StatisticsService, UserService,
    WorkoutService,
};
