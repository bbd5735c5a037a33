//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User role codes (stored in users.role)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum UserRole {
    Admin = 0,
    Ta = 1,
    Student = 2,
    Invalid = 3,
}

impl UserRole {
    /// Roles entitled to receive inventory notifications
    pub const NOTIFIABLE: [UserRole; 2] = [UserRole::Admin, UserRole::Ta];
}

impl From<i16> for UserRole {
    fn from(v: i16) -> Self {
        match v {
            0 => UserRole::Admin,
            1 => UserRole::Ta,
            2 => UserRole::Student,
            _ => UserRole::Invalid,
        }
    }
}

impl From<UserRole> for i16 {
    fn from(r: UserRole) -> Self {
        r as i16
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::Admin => "Admin",
            UserRole::Ta => "TA",
            UserRole::Student => "Student",
            UserRole::Invalid => "Invalid",
        };
        write!(f, "{}", label)
    }
}
