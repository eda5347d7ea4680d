//! # Filesystem-backed key/value store
//!
//! [`FileStore`] keeps each key in its own file under a base directory. It is
//! the durable backend for native builds, where there is no `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── token
//! ├── theme
//! └── notify_lowStock
//! ```
//!
//! Keys are used as file names after replacing anything outside
//! `[A-Za-z0-9_-]` with `_`.

use std::path::PathBuf;

use crate::kv::KeyValueStore;

/// Filesystem-backed store for native platforms.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.key_path(key), value);
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "zenvit_store_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = scratch_dir("reopen");

        let store = FileStore::new(dir.clone());
        store.set("token", "secret-token");

        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.get("token").as_deref(), Some("secret-token"));

        reopened.remove("token");
        assert!(store.get("token").is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory_reads_as_empty() {
        let dir = scratch_dir("missing");
        let store = FileStore::new(dir.join("does-not-exist"));

        assert!(store.get("theme").is_none());
        // Removing an absent key is a no-op.
        store.remove("theme");
    }

    #[test]
    fn test_keys_are_sanitised() {
        let dir = scratch_dir("sanitise");
        let store = FileStore::new(dir.clone());

        store.set("../escape", "nope");
        assert_eq!(store.get("../escape").as_deref(), Some("nope"));
        assert!(dir.join("___escape").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
