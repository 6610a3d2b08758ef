//! Client error types

use shared::{AppError, ErrorCode};
use shared::http::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required or credentials rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Classify a non-success response by status code
    pub fn from_status(status: StatusCode, text: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(text),
            StatusCode::FORBIDDEN => Self::Forbidden(text),
            StatusCode::NOT_FOUND => Self::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(text),
            _ => Self::Internal(text),
        }
    }

    /// Error code for user-facing notifications
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidRequest,
            Self::Unauthorized(_) => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether the session token should be discarded
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = err.code();
        let message = match &err {
            ClientError::Unauthorized(text)
            | ClientError::Forbidden(text)
            | ClientError::NotFound(text)
            | ClientError::Validation(text)
            | ClientError::Internal(text)
                if !text.is_empty() =>
            {
                text.clone()
            }
            ClientError::Http(_) => err.to_string(),
            _ => code.message().to_string(),
        };
        AppError::with_message(code, message)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            ClientError::Unauthorized(t) if t == "x"
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, String::new()),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, String::new()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            ClientError::Internal(_)
        ));
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            ClientError::Unauthorized(String::new()).code(),
            ErrorCode::NotAuthenticated
        );
        assert_eq!(
            ClientError::Validation(String::new()).code(),
            ErrorCode::ValidationFailed
        );
        assert!(ClientError::Unauthorized(String::new()).is_auth_failure());
        assert!(!ClientError::NotFound(String::new()).is_auth_failure());
    }

    #[test]
    fn test_into_app_error() {
        let err = AppError::from(ClientError::Unauthorized("invalid credentials".into()));
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
        assert_eq!(err.message, "invalid credentials");

        let err = AppError::from(ClientError::Forbidden(String::new()));
        assert_eq!(err.message, "Permission denied");
    }
}
