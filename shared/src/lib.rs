//! Shared types for Rindang
//!
//! Common types used by the front-end core and the backend REST client:
//! data models, the backend response envelope, error codes, price
//! handling and backend field-name normalization.

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod price;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    BackendTable, HitRegion, MenuCategory, MenuItem, PaymentMethod, Table, TableArea, TableStatus,
    UserRole,
};
pub use response::ApiEnvelope;
