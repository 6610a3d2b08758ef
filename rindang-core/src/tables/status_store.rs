//! Persisted occupancy status per table
//!
//! The whole mapping is stored as one JSON object under a fixed key:
//!
//! ```json
//! {"I6-1": "free", "I6-2": "reserved", "O4-1": "occupied"}
//! ```
//!
//! Loading never fails. Writes go through storage first; memory is only
//! updated after the write succeeded.

use super::registry::TableRegistry;
use crate::storage::{LocalStorage, StorageError};
use shared::models::{BackendTable, TableStatus};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

pub const STATUS_STORAGE_KEY: &str = "table-map-statuses-v1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Failed to persist table statuses: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize table statuses: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Legend counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub free: usize,
    pub reserved: usize,
    pub occupied: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.free + self.reserved + self.occupied
    }
}

pub struct TableStatusStore {
    statuses: BTreeMap<String, TableStatus>,
    storage: Arc<dyn LocalStorage>,
    registry: TableRegistry,
}

impl std::fmt::Debug for TableStatusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableStatusStore")
            .field("statuses", &self.statuses)
            .finish_non_exhaustive()
    }
}

impl TableStatusStore {
    /// Restore statuses from storage, defaulting every table to `free`
    pub fn load(registry: &TableRegistry, storage: Arc<dyn LocalStorage>) -> Self {
        let mut statuses: BTreeMap<String, TableStatus> = registry
            .ids()
            .map(|id| (id.to_string(), TableStatus::Free))
            .collect();

        match storage.get_item(STATUS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<HashMap<String, TableStatus>>(&raw) {
                Ok(persisted) => {
                    let mut dropped = 0usize;
                    for (id, status) in persisted {
                        match statuses.get_mut(&id) {
                            Some(slot) => *slot = status,
                            None => dropped += 1,
                        }
                    }
                    if dropped > 0 {
                        tracing::warn!(dropped, "Ignoring persisted statuses for unknown tables");
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted table statuses are malformed, starting all free");
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read table statuses, starting all free");
            }
        }

        Self {
            statuses,
            storage,
            registry: registry.clone(),
        }
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// Unknown ids read as `free`
    pub fn status(&self, id: &str) -> TableStatus {
        self.statuses.get(id).copied().unwrap_or_default()
    }

    pub fn snapshot(&self) -> BTreeMap<String, TableStatus> {
        self.statuses.clone()
    }

    pub fn set(&mut self, id: &str, status: TableStatus) -> Result<(), StoreError> {
        if !self.statuses.contains_key(id) {
            return Err(StoreError::UnknownTable(id.to_string()));
        }
        let mut next = self.statuses.clone();
        next.insert(id.to_string(), status);
        self.commit(next)?;
        tracing::info!(table_id = %id, status = %status, "Table status updated");
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        let next = self
            .registry
            .ids()
            .map(|id| (id.to_string(), TableStatus::Free))
            .collect();
        self.commit(next)?;
        tracing::info!("All table statuses reset to free");
        Ok(())
    }

    pub fn counts(&self) -> StatusCounts {
        self.statuses
            .values()
            .fold(StatusCounts::default(), |mut counts, status| {
                match status {
                    TableStatus::Free => counts.free += 1,
                    TableStatus::Reserved => counts.reserved += 1,
                    TableStatus::Occupied => counts.occupied += 1,
                }
                counts
            })
    }

    /// Overlay backend table rows onto the markers, persisting once
    ///
    /// Returns how many markers were updated.
    pub fn apply_backend(&mut self, tables: &[BackendTable]) -> Result<usize, StoreError> {
        let mut next = self.statuses.clone();
        let mut applied = 0usize;

        for row in tables {
            let Some(marker) = self.registry.marker_for_table_no(row.table_no) else {
                tracing::warn!(table_no = row.table_no, "Backend table has no floor-plan marker");
                continue;
            };
            let Some(status) = row.local_status() else {
                tracing::warn!(table_no = row.table_no, status = %row.status, "Unknown backend table status");
                continue;
            };
            next.insert(marker.id.clone(), status);
            applied += 1;
        }

        if applied > 0 {
            self.commit(next)?;
            tracing::info!(applied, "Table statuses synced from backend");
        }
        Ok(applied)
    }

    fn commit(&mut self, next: BTreeMap<String, TableStatus>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next)?;
        self.storage.set_item(STATUS_STORAGE_KEY, &json)?;
        self.statuses = next;
        Ok(())
    }
}
