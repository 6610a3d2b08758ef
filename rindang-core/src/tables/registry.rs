//! Static catalog of bookable tables

use shared::models::{HitRegion, Table, TableArea};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("table id must not be empty")]
    EmptyId,

    #[error("duplicate table id: {0}")]
    DuplicateId(String),

    #[error("table {0} must have at least one seat")]
    InvalidSeats(String),

    #[error("table {id} has an invalid hit radius {radius}")]
    InvalidRadius { id: String, radius: f64 },
}

/// (id, label, seats, area, center_x, center_y, radius) on the 920×650 image
const CAFE_FLOOR: [(&str, &str, u32, TableArea, f64, f64, f64); 14] = [
    ("I6-1", "Meja Indoor (6 kursi) - 1", 6, TableArea::Indoor, 180.0, 148.0, 33.0),
    ("I6-2", "Meja Indoor (6 kursi) - 2", 6, TableArea::Indoor, 180.0, 280.0, 35.0),
    ("I6-3", "Meja Indoor (6 kursi) - 3", 6, TableArea::Indoor, 180.0, 408.0, 38.0),
    ("I4-1", "Meja Indoor (4 kursi) - 1", 4, TableArea::Indoor, 523.0, 436.0, 22.0),
    ("I4-2", "Meja Indoor (4 kursi) - 2", 4, TableArea::Indoor, 660.0, 434.0, 22.0),
    ("I2-1", "Meja Indoor (2 kursi) - 1", 2, TableArea::Indoor, 811.0, 232.0, 19.0),
    ("I2-2", "Meja Indoor (2 kursi) - 2", 2, TableArea::Indoor, 811.0, 304.0, 19.0),
    ("I2-3", "Meja Indoor (2 kursi) - 3", 2, TableArea::Indoor, 811.0, 376.0, 19.0),
    ("I2-4", "Meja Indoor (2 kursi) - 4", 2, TableArea::Indoor, 809.0, 448.0, 19.0),
    ("I7-1", "Meja Indoor (7 kursi)", 7, TableArea::Indoor, 810.0, 130.0, 26.0),
    ("O4-1", "Meja Outdoor (4 kursi) - 1", 4, TableArea::Outdoor, 211.0, 561.0, 23.0),
    ("O4-2", "Meja Outdoor (4 kursi) - 2", 4, TableArea::Outdoor, 500.0, 562.0, 23.0),
    ("O4-3", "Meja Outdoor (4 kursi) - 3", 4, TableArea::Outdoor, 651.0, 563.0, 23.0),
    ("O4-4", "Meja Outdoor (4 kursi) - 4", 4, TableArea::Outdoor, 817.0, 561.0, 23.0),
];

/// Immutable, ordered set of tables with unique ids
///
/// Iteration order is declaration order; hit-testing and backend table
/// numbers both depend on it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegistry {
    tables: Vec<Table>,
}

impl TableRegistry {
    pub fn new(tables: Vec<Table>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(tables.len());
        for table in &tables {
            if table.id.trim().is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if !seen.insert(table.id.as_str()) {
                return Err(RegistryError::DuplicateId(table.id.clone()));
            }
            if table.seats == 0 {
                return Err(RegistryError::InvalidSeats(table.id.clone()));
            }
            let radius = table.hit_region.radius;
            if !(radius.is_finite() && radius > 0.0) {
                return Err(RegistryError::InvalidRadius {
                    id: table.id.clone(),
                    radius,
                });
            }
        }
        Ok(Self { tables })
    }

    /// The café's 14 tables
    pub fn default_floor() -> Self {
        let tables = CAFE_FLOOR
            .iter()
            .map(|&(id, label, seats, area, cx, cy, r)| Table {
                id: id.to_string(),
                label: label.to_string(),
                seats,
                area,
                hit_region: HitRegion::new(cx, cy, r),
            })
            .collect();
        Self { tables }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// (indoor, outdoor)
    pub fn count_by_area(&self) -> (usize, usize) {
        self.tables
            .iter()
            .fold((0, 0), |(indoor, outdoor), t| match t.area {
                TableArea::Indoor => (indoor + 1, outdoor),
                TableArea::Outdoor => (indoor, outdoor + 1),
            })
    }

    /// Backend table numbers are 1-based positions in declaration order
    pub fn marker_for_table_no(&self, table_no: i64) -> Option<&Table> {
        let index = usize::try_from(table_no).ok()?.checked_sub(1)?;
        self.tables.get(index)
    }

    pub fn table_no_for(&self, id: &str) -> Option<i64> {
        self.tables
            .iter()
            .position(|t| t.id == id)
            .and_then(|i| i64::try_from(i + 1).ok())
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::default_floor()
    }
}
