//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table (without the password hash)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// 'instructor' or 'student'
    pub role: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub body_type: Option<String>,
    pub health_conditions: Option<String>,
    pub goal: Option<String>,
    pub observations: Option<String>,
    pub phone: Option<String>,
    pub certifications: Option<String>,
    pub specializations: Option<String>,
    pub bio: Option<String>,
    pub years_of_experience: Option<i32>,
    pub social_links_json: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column list matching `UserModel`
pub const USER_COLUMNS: &str = "id, name, email, role, age, gender, description, \
     height, weight, body_type, health_conditions, goal, observations, \
     phone, certifications, specializations, bio, years_of_experience, social_links_json, \
     created_at, updated_at";
