//! Platform constructors for storage and the session store.
//!
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStore`]
//! - **Native**: one file per key under `<data_dir>/zenvit` via [`store::FileStore`]

use api::{ApiClient, ReqwestTransport, SessionStore};
use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

pub type AppSessionStore = SessionStore<PlatformStore, ReqwestTransport>;

/// Durable key/value storage for tokens and preferences.
pub fn make_storage() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("zenvit");
        store::FileStore::new(base)
    }
}

/// Session store talking to the configured backend.
pub fn make_session(config: &ClientConfig) -> AppSessionStore {
    let transport = ReqwestTransport::new(config.api_base());
    tracing::info!(api_base = %transport.api_base(), "using backend");
    SessionStore::new(make_storage(), ApiClient::new(transport))
}

/// Today's date as `YYYY-MM-DD` in local time.
#[cfg(target_arch = "wasm32")]
pub fn today() -> String {
    let date = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date()
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_iso() {
        let today = today();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
        assert_eq!(&today[7..8], "-");
    }
}
