//! Route handlers
//!
//! All HTTP request handlers organized by the audience they serve.

pub mod auth;
pub mod health;
pub mod instructors;
pub mod students;
pub mod users;
pub mod workouts;
