//! User entity <-> model mapper

use workout_core::entities::User;
use workout_core::value_objects::{Gender, UserId, UserRole};

use crate::models::UserModel;

/// Unknown role strings fall back to the least privileged role
fn parse_role(s: &str) -> UserRole {
    UserRole::parse(s).unwrap_or(UserRole::Student)
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            role: parse_role(&model.role),
            age: model.age,
            gender: model.gender.as_deref().and_then(Gender::parse),
            description: model.description,
            height: model.height,
            weight: model.weight,
            body_type: model.body_type,
            health_conditions: model.health_conditions,
            goal: model.goal,
            observations: model.observations,
            phone: model.phone,
            certifications: model.certifications,
            specializations: model.specializations,
            bio: model.bio,
            years_of_experience: model.years_of_experience,
            social_links_json: model.social_links_json,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
