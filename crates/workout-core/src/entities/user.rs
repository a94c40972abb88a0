//! User entity - an instructor or student account with its profile

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{Gender, UserId, UserRole};

/// User account
///
/// Student body metrics and instructor credentials live on the same record;
/// which group is meaningful depends on `role`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub description: Option<String>,

    // Student profile
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub body_type: Option<String>,
    pub health_conditions: Option<String>,
    pub goal: Option<String>,
    pub observations: Option<String>,

    // Instructor profile
    pub phone: Option<String>,
    pub certifications: Option<String>,
    pub specializations: Option<String>,
    pub bio: Option<String>,
    pub years_of_experience: Option<i32>,
    pub social_links_json: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with an empty profile
    pub fn new(id: UserId, name: String, email: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            role,
            age: None,
            gender: None,
            description: None,
            height: None,
            weight: None,
            body_type: None,
            health_conditions: None,
            goal: None,
            observations: None,
            phone: None,
            certifications: None,
            specializations: None,
            bio: None,
            years_of_experience: None,
            social_links_json: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_instructor(&self) -> bool {
        self.role == UserRole::Instructor
    }

    #[inline]
    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    /// Fail with `RoleRequired` unless the user carries `role`
    pub fn require_role(&self, role: UserRole) -> Result<(), DomainError> {
        if self.role == role {
            Ok(())
        } else {
            Err(DomainError::RoleRequired { required: role })
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Fields required to register an account
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
}

impl NewUser {
    pub fn new(name: String, email: String, role: UserRole) -> Self {
        Self {
            name,
            email,
            role,
            age: None,
            gender: None,
            description: None,
        }
    }
}
