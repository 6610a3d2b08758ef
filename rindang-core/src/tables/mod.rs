//! Table floor plan: static registry, persisted statuses, hit-testing

pub mod floor_plan;
pub mod registry;
pub mod status_store;

pub use floor_plan::{FloorPlan, Marker, Pick, PointerPos};
pub use registry::{RegistryError, TableRegistry};
pub use status_store::{STATUS_STORAGE_KEY, StatusCounts, StoreError, TableStatusStore};
