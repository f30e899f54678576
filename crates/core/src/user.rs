//! Team members and their roles.
//!
//! Roles only drive client-side affordances; the server never enforces
//! them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Advisory role of a team member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    #[default]
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// May edit entry fields and images.
    pub fn can_edit_entries(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }

    /// May create/delete users and open the monthly change report.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}', expected admin, editor or viewer"
            ))),
        }
    }
}

/// A team member. Never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    /// Unique display name, also used as the actor in entries and logs.
    pub name: String,
    /// Unique login credential (PIN or short username).
    pub identifier: String,
    pub role: Role,
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "identifier must not be empty"))]
    pub identifier: String,
    #[serde(default)]
    pub role: Role,
}

impl NewUser {
    /// Trim name and identifier, then validate.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let user = Self {
            name: self.name.trim().to_string(),
            identifier: self.identifier.trim().to_string(),
            role: self.role,
        };
        user.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(user)
    }
}
