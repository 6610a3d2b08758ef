//! Login session persisted in local storage
//!
//! The bearer token and role live under the fixed keys `token` and `role`.
//! Pages behind login call [`Session::require`] with the roles they admit.

use crate::storage::{LocalStorage, StorageError};
use shared::client::LoginResponse;
use shared::error::ErrorCode;
use shared::models::UserRole;
use std::sync::Arc;
use thiserror::Error;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Please log in first")]
    LoginRequired,

    #[error("Role {role} may not open this page")]
    Forbidden { role: String },
}

impl AccessError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::LoginRequired => ErrorCode::NotAuthenticated,
            Self::Forbidden { .. } => ErrorCode::PermissionDenied,
        }
    }
}

/// Landing page after login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    Admin,
    Staff,
    Cashier,
}

impl Dashboard {
    pub fn for_role(role: &UserRole) -> Option<Self> {
        match role {
            UserRole::Admin => Some(Self::Admin),
            UserRole::Staff => Some(Self::Staff),
            UserRole::Cashier => Some(Self::Cashier),
            UserRole::Other(_) => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Staff => "/staff",
            Self::Cashier => "/cashier",
        }
    }
}

pub struct Session {
    storage: Arc<dyn LocalStorage>,
    token: Option<String>,
    role: Option<UserRole>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Read errors are logged and treated as logged out
    pub fn restore(storage: Arc<dyn LocalStorage>) -> Self {
        let read = |key: &str| match storage.get_item(key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read session");
                None
            }
        };
        let token = read(TOKEN_KEY);
        let role = read(ROLE_KEY).map(UserRole::from);
        Self {
            storage,
            token,
            role,
        }
    }

    pub fn save_login(&mut self, login: &LoginResponse) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, &login.token)?;
        self.storage.set_item(ROLE_KEY, login.role.as_str())?;
        self.token = Some(login.token.clone());
        self.role = Some(login.role.clone());
        tracing::info!(role = %login.role, "Logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(ROLE_KEY)?;
        self.token = None;
        self.role = None;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<&UserRole> {
        self.role.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token for a protected page; an empty `allowed` admits any role
    pub fn require(&self, allowed: &[UserRole]) -> Result<&str, AccessError> {
        let token = self.token.as_deref().ok_or(AccessError::LoginRequired)?;
        if allowed.is_empty() {
            return Ok(token);
        }
        match &self.role {
            Some(role) if allowed.contains(role) => Ok(token),
            role => Err(AccessError::Forbidden {
                role: role.as_ref().map(|r| r.to_string()).unwrap_or_default(),
            }),
        }
    }

    pub fn dashboard(&self) -> Option<Dashboard> {
        self.token.as_ref()?;
        self.role.as_ref().and_then(Dashboard::for_role)
    }
}
