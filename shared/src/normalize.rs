//! Backend field-name normalization
//!
//! The backend serializes some structs with Go field names (`ID`,
//! `TableNo`, `ImageURL`) and others with snake_case tags. Every observed
//! variant is mapped to one canonical snake_case name here, before serde
//! sees the payload.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Backend field-name variant → canonical name
pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Id", "id"),
    ("Name", "name"),
    ("Tagline", "tagline"),
    ("ImageURL", "image_url"),
    ("ImageUrl", "image_url"),
    ("Image", "image_url"),
    ("image", "image_url"),
    ("Price", "price"),
    ("TableNo", "table_no"),
    ("Status", "status"),
    ("Phone", "phone"),
    ("Email", "email"),
    ("TableID", "table_id"),
    ("ReservationDate", "reservation_date"),
    ("TableFee", "table_fee"),
    ("Customer", "customer"),
    ("Total", "total_amount"),
    ("total", "total_amount"),
    ("PaymentMethod", "payment_method"),
    ("Username", "username"),
    ("Role", "role"),
    ("OrderItems", "order_items"),
    ("MenuID", "menu_id"),
    ("Quantity", "qty"),
    ("Subtotal", "subtotal"),
];

/// Canonical name for a backend field (unknown names are returned as is)
pub fn canonical_field(name: &str) -> &str {
    FIELD_ALIASES
        .iter()
        .find(|(variant, _)| *variant == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Rename object keys to their canonical names, recursively
///
/// When a canonical key and one of its variants are both present, the
/// canonical key's value is kept.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            let mut variants = Vec::new();
            for (key, val) in map {
                if canonical_field(&key) == key {
                    out.insert(key, normalize_keys(val));
                } else {
                    variants.push((key, val));
                }
            }
            for (key, val) in variants {
                let canonical = canonical_field(&key).to_string();
                if out.contains_key(&canonical) {
                    tracing::trace!(variant = %key, canonical = %canonical, "Dropping shadowed field variant");
                    continue;
                }
                out.insert(canonical, normalize_keys(val));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Strip the `{status, message, data}` envelope, if there is one
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.contains_key("data")
                && (map.contains_key("status") || map.contains_key("message")) =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Unwrap, normalize and deserialize a backend response body
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(normalize_keys(unwrap_data(value)))
}
