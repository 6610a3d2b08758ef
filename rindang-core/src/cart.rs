//! Cart aggregation for the menu ordering path
//!
//! Items are keyed by name. Unit prices arrive display-formatted
//! (`"15.000"`) and are parsed exactly once, on insertion. Quantities,
//! subtotals and the total saturate instead of overflowing.

use serde::{Deserialize, Serialize};
use shared::models::{MenuCategory, MenuItem, OrderItemRequest};
use shared::price::{format_thousands, parse_display_price};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Cart is empty, add a menu item first")]
    Empty,
}

/// A menu card as shown to the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub menu_id: i64,
    pub name: String,
    pub display_price: String,
}

impl MenuEntry {
    pub fn new(menu_id: i64, name: impl Into<String>, display_price: impl Into<String>) -> Self {
        Self {
            menu_id,
            name: name.into(),
            display_price: display_price.into(),
        }
    }
}

impl From<&MenuItem> for MenuEntry {
    fn from(item: &MenuItem) -> Self {
        Self::new(item.id, item.name.clone(), format_thousands(item.price))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_id: i64,
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub category: MenuCategory,
}

impl CartItem {
    pub fn subtotal(&self) -> i64 {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    category: MenuCategory,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> MenuCategory {
        self.category
    }

    pub fn set_category(&mut self, category: MenuCategory) {
        self.category = category;
    }

    pub fn add(&mut self, entry: &MenuEntry) {
        if let Some(item) = self.items.iter_mut().find(|i| i.name == entry.name) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartItem {
            menu_id: entry.menu_id,
            name: entry.name.clone(),
            unit_price: parse_display_price(&entry.display_price),
            quantity: 1,
            category: self.category,
        });
        tracing::debug!(item = %entry.name, "Added to cart");
    }

    /// Apply `delta`, clamped into `0..=u32::MAX`; zero removes the item
    pub fn update_quantity(&mut self, name: &str, delta: i64) {
        let Some(index) = self.items.iter().position(|i| i.name == name) else {
            return;
        };
        let next = i64::from(self.items[index].quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        if next == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.items.retain(|i| i.name != name);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(CartItem::subtotal)
            .fold(0, i64::saturating_add)
    }

    pub fn total_item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|i| i.quantity)
            .fold(0, u32::saturating_add)
    }

    pub fn ensure_ready_for_table_selection(&self) -> Result<(), CartError> {
        if self.is_empty() {
            Err(CartError::Empty)
        } else {
            Ok(())
        }
    }

    pub fn order_items(&self) -> Vec<OrderItemRequest> {
        self.items
            .iter()
            .map(|i| OrderItemRequest {
                menu_id: i.menu_id,
                qty: i.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn espresso() -> MenuEntry {
        MenuEntry::new(1, "Espresso", "15.000")
    }

    fn croissant() -> MenuEntry {
        MenuEntry::new(2, "Croissant", "22.500")
    }

    fn latte() -> MenuEntry {
        MenuEntry::new(3, "Latte", "Rp 28.000")
    }

    #[test]
    fn test_same_name_increments() {
        let mut cart = Cart::new();
        cart.add(&espresso());
        cart.add(&espresso());
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), 30_000);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_total_is_order_independent() {
        let adds = [espresso(), croissant(), espresso(), latte(), croissant()];
        let mut forward = Cart::new();
        adds.iter().for_each(|e| forward.add(e));
        let mut backward = Cart::new();
        adds.iter().rev().for_each(|e| backward.add(e));

        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.total(), 2 * 15_000 + 2 * 22_500 + 28_000);
        assert_eq!(forward.total_item_count(), backward.total_item_count());
    }

    #[test]
    fn test_decrement_by_quantity_removes() {
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add(&croissant());
        }
        cart.add(&espresso());
        cart.update_quantity("Croissant", -3);
        assert!(cart.get("Croissant").is_none());

        cart.update_quantity("Espresso", -50);
        assert!(cart.is_empty());
        assert_eq!(cart.ensure_ready_for_table_selection(), Err(CartError::Empty));
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let mut cart = Cart::new();
        cart.add(&latte());
        cart.update_quantity("Latte", 4);
        assert_eq!(cart.get("Latte").unwrap().quantity, 5);
        cart.update_quantity("Mocha", 1);
        assert_eq!(cart.items().len(), 1);

        cart.remove("Latte");
        cart.remove("Latte");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_huge_delta_clamps_quantity() {
        let mut cart = Cart::new();
        cart.add(&espresso());
        cart.update_quantity("Espresso", i64::MAX);
        assert_eq!(cart.get("Espresso").unwrap().quantity, u32::MAX);

        cart.add(&espresso());
        assert_eq!(cart.get("Espresso").unwrap().quantity, u32::MAX);
        assert_eq!(cart.total_item_count(), u32::MAX);

        cart.update_quantity("Espresso", i64::MIN);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_huge_price_saturates_total() {
        let mut cart = Cart::new();
        let gold = MenuEntry::new(1, "Gold", "9.223.372.036.854.775.807");
        cart.add(&gold);
        cart.add(&gold);
        cart.add(&espresso());

        assert_eq!(cart.get("Gold").unwrap().unit_price, i64::MAX);
        assert_eq!(cart.get("Gold").unwrap().subtotal(), i64::MAX);
        assert_eq!(cart.total(), i64::MAX);
    }

    #[test]
    fn test_category_recorded_at_insertion() {
        let mut cart = Cart::new();
        cart.set_category(MenuCategory::Coffee);
        cart.add(&espresso());
        cart.set_category(MenuCategory::Food);
        cart.add(&croissant());
        cart.add(&espresso());

        assert_eq!(cart.get("Espresso").unwrap().category, MenuCategory::Coffee);
        assert_eq!(cart.get("Croissant").unwrap().category, MenuCategory::Food);
    }

    #[test]
    fn test_order_items_and_entry_from_menu() {
        let item = MenuItem {
            id: 9,
            name: "Kopi Susu".into(),
            tagline: String::new(),
            image_url: String::new(),
            price: 18_000,
        };
        let entry = MenuEntry::from(&item);
        assert_eq!(entry.display_price, "18.000");

        let mut cart = Cart::new();
        cart.add(&entry);
        cart.add(&entry);
        assert!(cart.ensure_ready_for_table_selection().is_ok());
        assert_eq!(cart.order_items(), vec![OrderItemRequest { menu_id: 9, qty: 2 }]);
        cart.clear();
        assert!(cart.is_empty());
    }
}
