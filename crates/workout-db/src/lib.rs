//! # workout-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `workout-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use workout_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use workout_db::repositories::PgWorkoutRepository;
//! use workout_core::traits::WorkoutRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let workouts = PgWorkoutRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_lazy_pool, create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool,
};
pub use repositories::{
    PgConnectionRepository, PgExerciseRepository, PgExerciseStatusRepository, PgUserRepository,
    PgWorkoutDayRepository, PgWorkoutRepository,
};
