//! This crate contains all shared UI for the workspace.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `auth` | `AuthProvider`, `AuthContext` and `use_auth` over the session store |
//! | `guard` | `ProtectedRoute` |
//! | `resource_view` | Generic list page with form and delete dialog |
//! | `theme` | Preference loading and application |
//! | `activity_log` | In-app log of request outcomes |
//! | `views` | Dialogs, banners and the settings page |

use dioxus::prelude::*;

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

mod platform;
pub use platform::{make_session, make_storage, today, AppSessionStore, PlatformStore};

mod auth;
pub use auth::{use_auth, AuthContext, AuthProvider};

mod guard;
pub use guard::ProtectedRoute;

mod theme;
pub use theme::{apply_preferences, use_preferences, PreferencesProvider, PreferencesSignal};

mod navbar;
pub use navbar::{Navbar, SearchBox, UserMenu};

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, ActivityLogProvider, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogButton, ActivityLogPanel};

pub mod resource_view;
pub use resource_view::{use_resource_page, DraftFields, FormModal, ResourceHandle, ResourceView};

pub mod markdown;
pub use markdown::Markdown;
