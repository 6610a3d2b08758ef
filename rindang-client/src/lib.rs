//! Rindang Client - HTTP client for the café backend
//!
//! Typed REST calls for menu, reservations, tables, orders and staff
//! accounts. Responses are unwrapped from the backend envelope and their
//! field names normalized before deserialization.

pub mod config;
pub mod error;
pub mod http;

mod admin;
mod menu;
mod order;
mod reservation;
mod table;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUser};
