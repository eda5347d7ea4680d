//! # Client-side persistence for ZenVit
//!
//! Everything the front-end keeps outside the page lifecycle goes through the
//! [`KeyValueStore`] trait: the bearer token, the user's preference flags and
//! nothing else. Backends:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`MemoryStore`] | tests, native fallback |
//! | [`FileStore`] | native builds (one file per key) |
//! | [`LocalStore`] | browser `localStorage` (wasm32 + `web` feature) |

pub mod config;
pub mod kv;
pub mod preferences;
pub mod token;

mod file_store;
mod memory;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::ClientConfig;
pub use file_store::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use preferences::{AccentColor, NotificationPrefs, Preferences, Theme};
pub use token::{clear_token, load_token, save_token, TOKEN_KEY};
