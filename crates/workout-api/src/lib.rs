//! # workout-api
//!
//! REST API server built with Axum framework.
//!
//! Handlers resolve the caller from the bearer token, hand the request to a
//! `workout-service` use case and map its result onto HTTP.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
