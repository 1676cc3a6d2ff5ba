//! # Users and Roles
//!
//! Users are owned by the external identity service. The governance core
//! only reads them to make authorization decisions, and the only attribute
//! that matters for that is the [`Role`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::UserId;

/// The role of an actor. Fixed per user; there is no elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Resource owner: decides whether an unused resource may be deleted.
    User,
    /// Administrator: gives final approval or rejection of a deletion.
    Admin,
}

impl Role {
    /// All roles, in a fixed order.
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// The wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ValidationError::UnknownRole(s.to_string())),
        }
    }
}

/// An authenticated actor as described by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Whether this user holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
