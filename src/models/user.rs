//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::UserRole;

/// Application user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Email address used as the notification destination
    pub email: Option<String>,
    /// Role code (0=admin, 1=ta, 2=student, 3=invalid)
    pub role: i16,
}

impl User {
    pub fn role(&self) -> UserRole {
        UserRole::from(self.role)
    }
}
