//! User Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role issued by the backend on login
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Admin,
    Staff,
    Cashier,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Cashier => "cashier",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            "cashier" => Self::Cashier,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff account (`GET /admin/users`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(UserRole::from("ADMIN"), UserRole::Admin);
        assert_eq!(UserRole::from("cashier"), UserRole::Cashier);
        assert_eq!(UserRole::from("owner"), UserRole::Other("owner".to_string()));
        assert_eq!(serde_json::to_string(&UserRole::Staff).unwrap(), "\"staff\"");
        let role: UserRole = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role.as_str(), "owner");
    }
}
