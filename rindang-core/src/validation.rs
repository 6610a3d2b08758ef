//! Input validation helpers
//!
//! Text length constants and the validation failures shown to the user
//! when a form step refuses to advance.

use chrono::{NaiveDate, NaiveTime};
use shared::ErrorCode;
use thiserror::Error;

// ── Text length limits ──────────────────────────────────────────────

/// Customer and staff names (backend column is varchar(100))
pub const MAX_NAME_LEN: usize = 100;

/// Phone numbers (backend column is varchar(20))
pub const MAX_PHONE_LEN: usize = 20;

/// Email addresses (backend column is varchar(100))
pub const MAX_EMAIL_LEN: usize = 100;

/// Special request / order notes
pub const MAX_NOTE_LEN: usize = 500;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Required { field: &'static str },

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("reservation date {0} is in the past")]
    DateInPast(NaiveDate),

    #[error("no time slots left on {0}, please pick another date")]
    NoSlotsAvailable(NaiveDate),

    #[error("time slot {0} is not available")]
    SlotUnavailable(NaiveTime),

    #[error("guest count must be between {min} and {max} (got {got})")]
    GuestsOutOfRange { got: u32, min: u32, max: u32 },

    #[error("customer name is required")]
    CustomerRequired,

    #[error("payment method is required")]
    PaymentMethodRequired,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Required { .. } | Self::CustomerRequired => ErrorCode::RequiredField,
            Self::TooLong { .. } => ErrorCode::ValueOutOfRange,
            Self::DateInPast(_) => ErrorCode::ReservationDateInPast,
            Self::NoSlotsAvailable(_) => ErrorCode::NoTimeSlotsLeft,
            Self::SlotUnavailable(_) => ErrorCode::TimeSlotUnavailable,
            Self::GuestsOutOfRange { .. } => ErrorCode::GuestCountOutOfRange,
            Self::PaymentMethodRequired => ErrorCode::PaymentMethodRequired,
        }
    }
}

/// Validate that a required string is non-empty (after trimming) and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(ValidationError::TooLong {
            field,
            len,
            max: max_len,
        });
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(ValidationError::TooLong {
            field,
            len: v.chars().count(),
            max: max_len,
        });
    }
    Ok(())
}
