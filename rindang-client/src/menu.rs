//! Menu API

use crate::{ClientResult, HttpClient};
use reqwest::multipart::{Form, Part};
use shared::models::{MenuImage, MenuItem, MenuItemCreate, MenuItemUpdate};

fn image_part(image: MenuImage) -> Part {
    Part::bytes(image.bytes).file_name(image.file_name)
}

impl HttpClient {
    /// List all menu items (public)
    pub async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
        self.get("menu/").await
    }

    /// Create a menu item (admin)
    pub async fn create_menu(&self, item: MenuItemCreate) -> ClientResult<MenuItem> {
        let form = Form::new()
            .text("name", item.name)
            .text("tagline", item.tagline)
            .text("price", item.price.to_string())
            .part("image", image_part(item.image));
        self.post_multipart("menu/", form).await
    }

    /// Update a menu item (admin); unset fields are left unchanged
    pub async fn update_menu(&self, id: i64, update: MenuItemUpdate) -> ClientResult<MenuItem> {
        let mut form = Form::new();
        if let Some(name) = update.name {
            form = form.text("name", name);
        }
        if let Some(tagline) = update.tagline {
            form = form.text("tagline", tagline);
        }
        if let Some(price) = update.price {
            form = form.text("price", price.to_string());
        }
        if let Some(image) = update.image {
            form = form.part("image", image_part(image));
        }
        self.put_multipart(&format!("menu/{}", id), form).await
    }

    /// Delete a menu item (admin)
    pub async fn delete_menu(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("menu/{}", id)).await
    }
}
