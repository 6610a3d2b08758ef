//! Table API

use crate::{ClientResult, HttpClient};
use shared::models::{BackendTable, BackendTableUpdate, TableStatus};

impl HttpClient {
    /// List backend tables with their status
    pub async fn list_tables(&self) -> ClientResult<Vec<BackendTable>> {
        self.get("table/").await
    }

    /// Set a backend table's status, translated to the backend vocabulary
    pub async fn update_table_status(
        &self,
        id: i64,
        status: TableStatus,
    ) -> ClientResult<BackendTable> {
        let body = BackendTableUpdate {
            status: status.as_backend().to_string(),
        };
        self.put(&format!("table/{}", id), &body).await
    }
}
