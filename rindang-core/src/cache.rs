//! Last-known-good lists fetched from the backend
//!
//! A failed refresh keeps the previous values; the caller shows the
//! returned message as a notification.

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct ReadCache<T> {
    items: Vec<T>,
    refreshed: bool,
    last_error: Option<String>,
}

impl<T> Default for ReadCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            refreshed: false,
            last_error: None,
        }
    }
}

impl<T> ReadCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace on success, keep stale values on failure
    pub fn apply<E: Display>(&mut self, result: Result<Vec<T>, E>) -> Result<usize, String> {
        match result {
            Ok(items) => {
                self.items = items;
                self.refreshed = true;
                self.last_error = None;
                Ok(self.items.len())
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, stale = self.items.len(), "Refresh failed, keeping cached values");
                self.last_error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// At least one refresh succeeded
    pub fn is_loaded(&self) -> bool {
        self.refreshed
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
