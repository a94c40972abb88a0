//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use workout_core::error::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if is_unique_violation(&e) {
        return on_unique();
    }
    map_db_error(e)
}

/// Unique violation on a specific constraint or index, falling through to
/// `map_db_error` for any other failure
pub fn map_constraint_violation<F>(e: SqlxError, constraint: &str, on_match: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    let matches = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation() && db.constraint() == Some(constraint));
    if matches {
        on_match()
    } else {
        map_db_error(e)
    }
}

fn is_unique_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
