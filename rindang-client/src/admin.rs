//! Staff account administration API

use crate::{ClientResult, HttpClient, RegisterRequest, RegisteredUser};
use serde::Deserialize;
use shared::models::User;

/// `GET /admin/users` answers `{users: [...]}`
#[derive(Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<User>,
}

impl HttpClient {
    /// Register a staff account (admin)
    pub async fn register_user(&self, request: &RegisterRequest) -> ClientResult<RegisteredUser> {
        self.post("admin/register", request).await
    }

    /// List staff accounts (admin)
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        let list: UserList = self.get("admin/users").await?;
        Ok(list.users)
    }

    /// Delete a staff account (admin)
    pub async fn delete_user(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("admin/users/{}", id)).await
    }
}
