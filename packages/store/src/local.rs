//! # Browser `localStorage` backend
//!
//! [`LocalStore`] is the [`KeyValueStore`] used by the web build. It looks up
//! `window.localStorage` on every call; if storage is disabled (private mode,
//! sandboxed iframe) reads return `None` and writes are dropped.

use crate::kv::KeyValueStore;

/// `window.localStorage` wrapper.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
