//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use workout_core::entities::{NewUser, User};
use workout_core::error::DomainError;
use workout_core::traits::{RepoResult, UserRepository};
use workout_core::value_objects::UserId;

use crate::models::{UserModel, USER_COLUMNS};

use super::error::{map_db_error, map_unique_violation};

/// Escape LIKE metacharacters and wrap in `%`
fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let results = sqlx::query_as::<_, UserModel>(&sql)
            .bind(&raw)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
            ",
        )
        .bind(email.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE name ILIKE $1 OR email ILIKE $1 \
             ORDER BY name, id \
             LIMIT $2"
        );
        let results = sqlx::query_as::<_, UserModel>(&sql)
            .bind(contains_pattern(query.trim()))
            .bind(limit.clamp(1, 100))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, user, password_hash), fields(email = %user.email))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, role, age, gender, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        );
        let model = sqlx::query_as::<_, UserModel>(&sql)
            .bind(&user.name)
            .bind(user.email.trim())
            .bind(password_hash)
            .bind(user.role.as_str())
            .bind(user.age)
            .bind(user.gender.map(|g| g.as_str()))
            .bind(&user.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(User::from(model))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $2, age = $3, gender = $4, description = $5,
                height = $6, weight = $7, body_type = $8, health_conditions = $9,
                goal = $10, observations = $11,
                phone = $12, certifications = $13, specializations = $14, bio = $15,
                years_of_experience = $16, social_links_json = $17,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(user.age)
        .bind(user.gender.map(|g| g.as_str()))
        .bind(&user.description)
        .bind(user.height)
        .bind(user.weight)
        .bind(&user.body_type)
        .bind(&user.health_conditions)
        .bind(&user.goal)
        .bind(&user.observations)
        .bind(&user.phone)
        .bind(&user.certifications)
        .bind(&user.specializations)
        .bind(&user.bio)
        .bind(user.years_of_experience)
        .bind(&user.social_links_json)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, id: UserId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let statuses = sqlx::query("DELETE FROM exercise_statuses WHERE student_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let connections = sqlx::query(
            r"
            DELETE FROM student_instructors WHERE student_id = $1 OR instructor_id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Days, exercises and their statuses cascade
        let workouts = sqlx::query("DELETE FROM workouts WHERE student_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let user = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if user.rows_affected() == 0 {
            // Dropping the transaction rolls everything back
            return Err(DomainError::UserNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(
            user_id = %id,
            statuses = statuses.rows_affected(),
            connections = connections.rows_affected(),
            workouts = workouts.rows_affected(),
            "Account rows removed"
        );
        Ok(())
    }
}
