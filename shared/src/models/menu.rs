//! Menu Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu item as listed by the backend (`GET /menu`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub image_url: String,
    /// Whole rupiah
    #[serde(default, deserialize_with = "crate::price::deserialize_amount")]
    pub price: i64,
}

/// Image file attached to a menu create/update form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Create menu item payload (sent as a multipart form)
#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub name: String,
    pub tagline: String,
    pub price: i64,
    pub image: MenuImage,
}

/// Update menu item payload (multipart form, only set fields are sent)
#[derive(Debug, Clone, Default)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub price: Option<i64>,
    pub image: Option<MenuImage>,
}

/// Menu filter category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuCategory {
    #[default]
    All,
    Coffee,
    Food,
    NonCoffee,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 4] = [Self::All, Self::Coffee, Self::Food, Self::NonCoffee];

    pub fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Coffee => "coffee",
            Self::Food => "food",
            Self::NonCoffee => "nonCoffee",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Menu",
            Self::Coffee => "Coffee",
            Self::Food => "Food",
            Self::NonCoffee => "Non Coffee",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
