//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation payment status
///
/// The backend writes `Unpaid`/`Paid` on create/confirm and documents
/// `pending`/`paid`/`cancelled`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
    Other(String),
}

impl From<String> for ReservationStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" | "unpaid" | "" => Self::Pending,
            "paid" => Self::Paid,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Pending => "pending".to_string(),
            ReservationStatus::Paid => "paid".to_string(),
            ReservationStatus::Cancelled => "cancelled".to_string(),
            ReservationStatus::Other(s) => s,
        }
    }
}

/// Reservation as returned by `GET /reservation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub table_id: i64,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub reservation_date: String,
    #[serde(default, deserialize_with = "crate::price::deserialize_amount")]
    pub table_fee: i64,
    #[serde(default)]
    pub status: ReservationStatus,
}

/// Create reservation payload (`POST /reservation`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub table_id: i64,
    /// RFC 3339 timestamp
    pub reservation_date: String,
}
