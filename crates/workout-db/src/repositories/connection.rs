//! PostgreSQL implementation of ConnectionRepository
//!
//! The partial unique indexes on `student_instructors` keep one pending and
//! one accepted record per pair; answers are a conditional update.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use workout_core::entities::{Connection, NewConnection};
use workout_core::error::DomainError;
use workout_core::traits::{ConnectionRepository, RepoResult};
use workout_core::value_objects::{ConnectionId, InvitationStatus, UserId};

use crate::models::ConnectionModel;

use super::error::{map_constraint_violation, map_db_error};

const PENDING_INDEX: &str = "student_instructors_one_pending";

/// PostgreSQL implementation of ConnectionRepository
#[derive(Clone)]
pub struct PgConnectionRepository {
    pool: PgPool,
}

impl PgConnectionRepository {
    /// Create a new PgConnectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRepository for PgConnectionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ConnectionId) -> RepoResult<Option<Connection>> {
        let result = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, student_id, instructor_id, status, invited_at, responded_at, connected_at
            FROM student_instructors
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Connection::from))
    }

    #[instrument(skip(self))]
    async fn find_by_pair(
        &self,
        student_id: UserId,
        instructor_id: UserId,
        status: InvitationStatus,
    ) -> RepoResult<Option<Connection>> {
        let result = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, student_id, instructor_id, status, invited_at, responded_at, connected_at
            FROM student_instructors
            WHERE student_id = $1 AND instructor_id = $2 AND status = $3
            ORDER BY invited_at DESC
            LIMIT 1
            ",
        )
        .bind(student_id.into_inner())
        .bind(instructor_id.into_inner())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Connection::from))
    }

    #[instrument(skip(self, connection), fields(student_id = %connection.student_id, instructor_id = %connection.instructor_id))]
    async fn create(&self, connection: &NewConnection) -> RepoResult<Connection> {
        let model = sqlx::query_as::<_, ConnectionModel>(
            r"
            INSERT INTO student_instructors (student_id, instructor_id, status, invited_at)
            VALUES ($1, $2, 'pending', $3)
            RETURNING id, student_id, instructor_id, status, invited_at, responded_at, connected_at
            ",
        )
        .bind(connection.student_id.into_inner())
        .bind(connection.instructor_id.into_inner())
        .bind(connection.invited_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, PENDING_INDEX, || DomainError::InvitationAlreadyPending)
        })?;

        Ok(Connection::from(model))
    }

    #[instrument(skip(self, connection), fields(id = %connection.id, status = %connection.status))]
    async fn save_response(&self, connection: &Connection) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE student_instructors
            SET status = $3, responded_at = $4, connected_at = $5
            WHERE id = $1 AND student_id = $2 AND status = 'pending'
            ",
        )
        .bind(connection.id.into_inner())
        .bind(connection.student_id.into_inner())
        .bind(connection.status.as_str())
        .bind(connection.responded_at)
        .bind(connection.connected_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // A second accepted record for the pair
            map_constraint_violation(e, "student_instructors_one_accepted", || {
                DomainError::AlreadyConnected
            })
        })?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete_accepted(&self, student_id: UserId, instructor_id: UserId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM student_instructors
            WHERE student_id = $1 AND instructor_id = $2 AND status = 'accepted'
            ",
        )
        .bind(student_id.into_inner())
        .bind(instructor_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_pending_for_student(&self, student_id: UserId) -> RepoResult<Vec<Connection>> {
        let results = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, student_id, instructor_id, status, invited_at, responded_at, connected_at
            FROM student_instructors
            WHERE student_id = $1 AND status = 'pending'
            ORDER BY invited_at DESC, id DESC
            ",
        )
        .bind(student_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Connection::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_instructor(&self, instructor_id: UserId) -> RepoResult<Vec<Connection>> {
        let results = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, student_id, instructor_id, status, invited_at, responded_at, connected_at
            FROM student_instructors
            WHERE instructor_id = $1
            ORDER BY invited_at DESC, id DESC
            ",
        )
        .bind(instructor_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Connection::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_accepted_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> RepoResult<Vec<Connection>> {
        let results = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, student_id, instructor_id, status, invited_at, responded_at, connected_at
            FROM student_instructors
            WHERE instructor_id = $1 AND status = 'accepted'
            ORDER BY connected_at DESC, id DESC
            ",
        )
        .bind(instructor_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Connection::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_accepted_by_student(&self, student_id: UserId) -> RepoResult<Vec<Connection>> {
        let results = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, student_id, instructor_id, status, invited_at, responded_at, connected_at
            FROM student_instructors
            WHERE student_id = $1 AND status = 'accepted'
            ORDER BY connected_at DESC, id DESC
            ",
        )
        .bind(student_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Connection::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_accepted_students(&self, instructor_id: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(DISTINCT student_id)
            FROM student_instructors
            WHERE instructor_id = $1 AND status = 'accepted'
            ",
        )
        .bind(instructor_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
