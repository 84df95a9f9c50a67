//! User model and form types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::UserRole;
use super::Identified;

/// User as returned by the loan service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub role: UserRole,
    /// Badge number, unique per user
    #[serde(rename = "matricula")]
    pub badge: String,
    pub email: String,
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create/update user request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "tipo")]
    pub role: UserRole,
    #[serde(rename = "matricula")]
    #[validate(length(min = 1, message = "Badge number is required"))]
    pub badge: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl UserForm {
    /// Trimmed copy of the form, as it will be submitted
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            role: self.role,
            badge: self.badge.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            role: user.role,
            badge: user.badge.clone(),
            email: user.email.clone(),
        }
    }
}
