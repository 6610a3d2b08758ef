//! Data models
//!
//! Shared between the front-end core and the backend client.
//! Backend ids are `i64` (numeric primary keys) except user ids, which the
//! backend generates as prefixed strings (`STF-001`, `CAS-002`).
//! Money amounts are whole rupiah in `i64`.

pub mod dining_table;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use menu::*;
pub use order::*;
pub use reservation::*;
pub use user::*;
