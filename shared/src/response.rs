//! Backend response envelope
//!
//! Most backend endpoints answer with
//! ```json
//! { "status": "success", "message": "...", "data": { ... } }
//! ```
//! Auth endpoints answer with a bare object, and report failures as
//! `{ "error": "..." }`.

use serde::{Deserialize, Serialize};

/// Backend envelope status for successful calls
pub const STATUS_SUCCESS: &str = "success";

/// Backend envelope status for failed calls
pub const STATUS_ERROR: &str = "error";

/// Unified backend response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// `success` / `error`, absent on some endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Bare-object error text (auth endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            status: Some(STATUS_SUCCESS.to_string()),
            message: None,
            error: None,
            data: Some(data),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Some(STATUS_ERROR.to_string()),
            message: Some(message.into()),
            error: None,
            data: None,
        }
    }

    /// A response is a failure only when it says so
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status.as_deref() != Some(STATUS_ERROR)
    }

    /// Text to show the user: `message`, else `error`
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.error.as_deref())
    }
}
