//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seating area of a table marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableArea {
    Indoor,
    Outdoor,
}

impl fmt::Display for TableArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableArea::Indoor => write!(f, "Indoor"),
            TableArea::Outdoor => write!(f, "Outdoor"),
        }
    }
}

/// Circular clickable region in reference-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl HitRegion {
    pub const fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Inclusive circle test: a point exactly on the boundary is inside
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Table marker on the café floor plan (not a backend row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub label: String,
    pub seats: u32,
    pub area: TableArea,
    pub hit_region: HitRegion,
}

/// Occupancy status of a table marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Reserved,
    Occupied,
}

impl TableStatus {
    pub const ALL: [TableStatus; 3] = [Self::Free, Self::Reserved, Self::Occupied];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Map the backend vocabulary (`available` / `booked` / `in_use`)
    pub fn from_backend(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Some(Self::Free),
            "booked" => Some(Self::Reserved),
            "in_use" => Some(Self::Occupied),
            _ => None,
        }
    }

    pub fn as_backend(&self) -> &'static str {
        match self {
            Self::Free => "available",
            Self::Reserved => "booked",
            Self::Occupied => "in_use",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`TableStatus`] from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown table status: {0}")]
pub struct UnknownTableStatus(pub String);

impl FromStr for TableStatus {
    type Err = UnknownTableStatus;

    /// Accepts both the local and the backend vocabulary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "reserved" => Ok(Self::Reserved),
            "occupied" => Ok(Self::Occupied),
            other => Self::from_backend(other).ok_or_else(|| UnknownTableStatus(s.to_string())),
        }
    }
}

/// Table row as stored by the backend (`GET /table`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendTable {
    pub id: i64,
    pub table_no: i64,
    #[serde(default)]
    pub status: String,
}

impl BackendTable {
    pub fn local_status(&self) -> Option<TableStatus> {
        TableStatus::from_backend(&self.status)
    }
}

/// Update table payload (`PUT /table/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendTableUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_region_boundary_inclusive() {
        let region = HitRegion::new(100.0, 100.0, 10.0);
        assert!(region.contains(100.0, 100.0));
        assert!(region.contains(110.0, 100.0));
        assert!(region.contains(100.0, 90.0));
        assert!(!region.contains(110.1, 100.0));
        assert!(!region.contains(108.0, 108.0));
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&TableStatus::Reserved).unwrap(), "\"reserved\"");
        let s: TableStatus = serde_json::from_str("\"occupied\"").unwrap();
        assert_eq!(s, TableStatus::Occupied);
        assert!(serde_json::from_str::<TableStatus>("\"broken\"").is_err());
        assert_eq!(TableStatus::default(), TableStatus::Free);
    }

    #[test]
    fn test_backend_vocabulary() {
        assert_eq!(TableStatus::from_backend("available"), Some(TableStatus::Free));
        assert_eq!(TableStatus::from_backend("booked"), Some(TableStatus::Reserved));
        assert_eq!(TableStatus::from_backend("IN_USE"), Some(TableStatus::Occupied));
        assert_eq!(TableStatus::from_backend("cleaning"), None);
        for status in TableStatus::ALL {
            assert_eq!(TableStatus::from_backend(status.as_backend()), Some(status));
        }
    }

    #[test]
    fn test_from_str_accepts_both_vocabularies() {
        assert_eq!("free".parse::<TableStatus>(), Ok(TableStatus::Free));
        assert_eq!("Reserved".parse::<TableStatus>(), Ok(TableStatus::Reserved));
        assert_eq!("in_use".parse::<TableStatus>(), Ok(TableStatus::Occupied));
        assert!("x".parse::<TableStatus>().is_err());
    }
}
