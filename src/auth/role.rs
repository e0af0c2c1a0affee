use serde::{Deserialize, Serialize};
use std::fmt;

/// Privilege tier a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any holder of a valid token
    Authenticated,
    /// Managers and admins
    Manager,
    /// Admins only
    Admin,
}

/// Role carried by a user record and its tokens.
///
/// Stored as free text. Only the exact strings `"manager"` and `"admin"` carry
/// privileges; anything else (including `"Manager"` or an empty string) is an
/// [`Role::Engineer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Engineer,
    Manager,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            _ => Role::Engineer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Engineer => "engineer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    pub fn satisfies(&self, access: Access) -> bool {
        match access {
            Access::Authenticated => true,
            Access::Manager => matches!(self, Role::Manager | Role::Admin),
            Access::Admin => matches!(self, Role::Admin),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Engineer
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Option<&str>> for Role {
    fn from(value: Option<&str>) -> Self {
        value.map(Role::parse).unwrap_or_default()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
