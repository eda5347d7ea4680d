//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the app's single [`AppSessionStore`] and mirrors its
//! state into a signal, so any component reading [`AuthContext::session`]
//! re-renders on login, logout or expiry.

use api::{ApiError, Session, UserInfo};
use dioxus::prelude::*;
use store::ClientConfig;

use crate::platform::{make_session, AppSessionStore};

/// Handle to the session, available to every component under [`AuthProvider`].
#[derive(Clone, Copy, PartialEq)]
pub struct AuthContext {
    store: CopyValue<AppSessionStore>,
    config: CopyValue<ClientConfig>,
    session: Signal<Session>,
}

impl AuthContext {
    /// Current session; subscribes the calling component.
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.session.read().user.clone()
    }

    /// Latest token, read without subscribing. Use this inside tasks.
    pub fn token(&self) -> Option<String> {
        self.store.read().token()
    }

    pub fn store(&self) -> AppSessionStore {
        self.store.cloned()
    }

    pub fn config(&self) -> ClientConfig {
        self.config.cloned()
    }

    /// Absolute URL for a server-relative path such as an uploaded image.
    pub fn asset_url(&self, path: &str) -> String {
        self.config.read().asset_url(path)
    }

    /// Expire the session if `err` means the token was rejected.
    pub fn check_unauthorized(&self, err: &ApiError) -> bool {
        self.store().check_unauthorized(err)
    }

    pub fn logout(&self) {
        self.store().logout();
    }
}

/// Get the authentication context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Creates the session store, verifies any stored token once on mount and
/// provides [`AuthContext`] to its children.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let store = use_hook(|| CopyValue::new(make_session(&config)));
    let config = use_hook(|| CopyValue::new(config.clone()));
    let session = use_signal(|| store.read().snapshot());

    use_hook(move || {
        store.read().subscribe(move |next: &Session| {
            let mut session = session;
            session.set(next.clone());
        });
    });

    let _restore = use_future(move || async move {
        let store = store.cloned();
        let phase = store.restore().await;
        tracing::debug!(?phase, "session restored");
    });

    use_context_provider(|| AuthContext {
        store,
        config,
        session,
    });

    rsx! {
        {children}
    }
}
