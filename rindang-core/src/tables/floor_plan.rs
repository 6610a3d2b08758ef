//! Floor-plan hit testing
//!
//! Hit regions are declared in the natural pixel space of the floor-plan
//! image. The image is displayed scaled; pointer positions arrive in
//! displayed pixels relative to the image's top-left corner and are mapped
//! back by dividing through the scale factor.

use super::registry::TableRegistry;
use super::status_store::TableStatusStore;
use crate::config::{DEFAULT_FLOOR_PLAN_HEIGHT, DEFAULT_FLOOR_PLAN_WIDTH};
use shared::models::{Table, TableStatus};

/// Pointer position in displayed pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Outcome of a click on the floor plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pick<'a> {
    /// A free table was hit
    Selected(&'a Table),
    /// A reserved or occupied table was hit
    Unavailable { table: &'a Table, status: TableStatus },
    Miss,
}

/// Overlay geometry for one table, in displayed pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub size: f64,
    pub status: TableStatus,
    pub seats: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorPlan {
    pub natural_width: f64,
    pub natural_height: f64,
    pub displayed_width: f64,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR_PLAN_WIDTH, DEFAULT_FLOOR_PLAN_HEIGHT)
    }
}

impl FloorPlan {
    /// Displayed at natural size until the first resize
    pub fn new(natural_width: f64, natural_height: f64) -> Self {
        Self {
            natural_width,
            natural_height,
            displayed_width: natural_width,
        }
    }

    pub fn scale(&self) -> f64 {
        let scale = self.displayed_width / self.natural_width;
        if self.natural_width == 0.0 || self.displayed_width == 0.0 || !scale.is_finite() {
            1.0
        } else {
            scale
        }
    }

    pub fn resize(&mut self, displayed_width: f64) {
        self.displayed_width = displayed_width;
        tracing::debug!(displayed_width, scale = self.scale(), "Floor plan resized");
    }

    pub fn displayed_height(&self) -> f64 {
        self.natural_height * self.scale()
    }

    /// First table in registry order whose region contains the pointer
    pub fn table_at<'a>(&self, registry: &'a TableRegistry, pos: PointerPos) -> Option<&'a Table> {
        let scale = self.scale();
        let (x, y) = (pos.x / scale, pos.y / scale);
        let hit = registry.iter().find(|t| t.hit_region.contains(x, y));
        if let Some(table) = hit {
            tracing::debug!(table_id = %table.id, x, y, "Floor plan hit");
        }
        hit
    }

    pub fn pick<'a>(
        &self,
        registry: &'a TableRegistry,
        store: &TableStatusStore,
        pos: PointerPos,
    ) -> Pick<'a> {
        match self.table_at(registry, pos) {
            None => Pick::Miss,
            Some(table) => match store.status(&table.id) {
                TableStatus::Free => Pick::Selected(table),
                status => Pick::Unavailable { table, status },
            },
        }
    }

    pub fn markers(&self, registry: &TableRegistry, store: &TableStatusStore) -> Vec<Marker> {
        let scale = self.scale();
        registry
            .iter()
            .map(|t| {
                let region = t.hit_region;
                Marker {
                    id: t.id.clone(),
                    left: (region.center_x - region.radius) * scale,
                    top: (region.center_y - region.radius) * scale,
                    size: region.radius * 2.0 * scale,
                    status: store.status(&t.id),
                    seats: t.seats,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use shared::models::{HitRegion, TableArea};
    use std::sync::Arc;

    fn single(id: &str, cx: f64, cy: f64, r: f64) -> Table {
        Table {
            id: id.to_string(),
            label: id.to_string(),
            seats: 4,
            area: TableArea::Indoor,
            hit_region: HitRegion::new(cx, cy, r),
        }
    }

    #[test]
    fn test_scale_fallback() {
        let mut plan = FloorPlan::default();
        assert_eq!(plan.scale(), 1.0);
        plan.resize(460.0);
        assert_eq!(plan.scale(), 0.5);
        assert_eq!(plan.displayed_height(), 325.0);
        plan.resize(0.0);
        assert_eq!(plan.scale(), 1.0);
        assert_eq!(FloorPlan::new(0.0, 0.0).scale(), 1.0);
        let mut plan = FloorPlan::default();
        plan.resize(f64::NAN);
        assert_eq!(plan.scale(), 1.0);
    }

    #[test]
    fn test_hit_inside_and_outside() {
        let registry = TableRegistry::new(vec![single("T1", 100.0, 100.0, 20.0)]).unwrap();
        let mut plan = FloorPlan::default();
        plan.resize(460.0);

        let hit = plan.table_at(&registry, PointerPos::new(50.0, 50.0));
        assert_eq!(hit.map(|t| t.id.as_str()), Some("T1"));
        assert!(plan.table_at(&registry, PointerPos::new(70.0, 50.0)).is_none());
    }

    #[test]
    fn test_boundary_is_inside() {
        let registry = TableRegistry::new(vec![single("T1", 100.0, 100.0, 20.0)]).unwrap();
        let plan = FloorPlan::default();
        assert!(plan.table_at(&registry, PointerPos::new(120.0, 100.0)).is_some());
        assert!(plan.table_at(&registry, PointerPos::new(120.5, 100.0)).is_none());
    }

    #[test]
    fn test_overlap_first_declared_wins() {
        let registry = TableRegistry::new(vec![
            single("A", 100.0, 100.0, 30.0),
            single("B", 110.0, 100.0, 30.0),
        ])
        .unwrap();
        let plan = FloorPlan::default();
        let hit = plan.table_at(&registry, PointerPos::new(105.0, 100.0));
        assert_eq!(hit.map(|t| t.id.as_str()), Some("A"));
    }

    #[test]
    fn test_pick_respects_status() {
        let registry = TableRegistry::default_floor();
        let mut store = TableStatusStore::load(&registry, Arc::new(MemoryStorage::new()));
        let plan = FloorPlan::default();
        let on_i7 = PointerPos::new(810.0, 130.0);

        assert!(matches!(plan.pick(&registry, &store, on_i7), Pick::Selected(t) if t.id == "I7-1"));

        store.set("I7-1", TableStatus::Occupied).unwrap();
        assert!(matches!(
            plan.pick(&registry, &store, on_i7),
            Pick::Unavailable { table, status: TableStatus::Occupied } if table.id == "I7-1"
        ));

        assert_eq!(plan.pick(&registry, &store, PointerPos::new(5.0, 5.0)), Pick::Miss);
    }

    #[test]
    fn test_default_floor_centers_hit_their_table() {
        let registry = TableRegistry::default_floor();
        let plan = FloorPlan::default();
        for table in registry.iter() {
            let pos = PointerPos::new(table.hit_region.center_x, table.hit_region.center_y);
            assert_eq!(plan.table_at(&registry, pos).map(|t| &t.id), Some(&table.id));
        }
    }

    #[test]
    fn test_markers_scaled() {
        let registry = TableRegistry::new(vec![single("T1", 100.0, 60.0, 20.0)]).unwrap();
        let store = TableStatusStore::load(&registry, Arc::new(MemoryStorage::new()));
        let mut plan = FloorPlan::default();
        plan.resize(460.0);

        let markers = plan.markers(&registry, &store);
        assert_eq!(
            markers,
            vec![Marker {
                id: "T1".into(),
                left: 40.0,
                top: 20.0,
                size: 20.0,
                status: TableStatus::Free,
                seats: 4,
            }]
        );
    }
}
