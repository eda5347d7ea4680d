//! User preferences: loaded once from storage, applied to the document root.

use dioxus::prelude::*;
use store::Preferences;

use crate::auth::{use_auth, AuthContext};

pub type PreferencesSignal = Signal<Preferences>;

pub fn use_preferences() -> PreferencesSignal {
    use_context::<PreferencesSignal>()
}

/// Provides [`PreferencesSignal`]. Must sit under [`crate::AuthProvider`],
/// whose storage the preferences share.
#[component]
pub fn PreferencesProvider(children: Element) -> Element {
    let auth = use_auth();
    let prefs = use_context_provider(|| Signal::new(Preferences::load(auth.store().storage())));

    use_effect(move || apply_preferences(&prefs.read()));

    rsx! {
        {children}
    }
}

/// Persist and apply new preferences.
pub fn save_preferences(auth: AuthContext, mut prefs: PreferencesSignal, next: Preferences) {
    next.save(auth.store().storage());
    prefs.set(next);
}

/// Remove stored preferences and fall back to the defaults. The session
/// token is left alone.
pub fn reset_preferences(auth: AuthContext, mut prefs: PreferencesSignal) {
    prefs.set(Preferences::reset(auth.store().storage()));
}

/// Toggle the `dark` class and set `data-accent` on `<html>`; the stylesheet
/// maps `data-accent` to `--accent-color`.
pub fn apply_preferences(prefs: &Preferences) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let _ = root
            .class_list()
            .toggle_with_force("dark", prefs.theme == store::Theme::Dark);
        let _ = root.set_attribute("data-accent", prefs.accent.as_str());
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!(
        theme = prefs.theme.as_str(),
        accent = prefs.accent.hex(),
        "preferences applied"
    );
}
