//! Student/instructor relationship model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for student_instructors table
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionModel {
    pub id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    /// 'pending', 'accepted' or 'rejected'
    pub status: String,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub connected_at: Option<DateTime<Utc>>,
}
