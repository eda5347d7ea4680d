//! # User preferences
//!
//! Appearance and notification settings are kept as independent key/value
//! entries next to the token. They are not versioned and unknown values fall
//! back to the defaults.
//!
//! | Key | Values | Default |
//! |-----|--------|---------|
//! | `theme` | `light`, `dark` | `light` |
//! | `accentColor` | `blue`, `green`, `purple` | `blue` |
//! | `notify_lowStock` | anything but `"false"` enables | enabled |
//! | `notify_newOrders` | anything but `"false"` enables | enabled |
//! | `notify_taskDeadlines` | anything but `"false"` enables | enabled |

use crate::kv::KeyValueStore;

const THEME_KEY: &str = "theme";
const ACCENT_KEY: &str = "accentColor";
const LOW_STOCK_KEY: &str = "notify_lowStock";
const NEW_ORDERS_KEY: &str = "notify_newOrders";
const TASK_DEADLINES_KEY: &str = "notify_taskDeadlines";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Lys",
            Theme::Dark => "Mørk",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccentColor {
    #[default]
    Blue,
    Green,
    Purple,
}

impl AccentColor {
    pub const ALL: [AccentColor; 3] = [AccentColor::Blue, AccentColor::Green, AccentColor::Purple];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccentColor::Blue => "blue",
            AccentColor::Green => "green",
            AccentColor::Purple => "purple",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "green" => AccentColor::Green,
            "purple" => AccentColor::Purple,
            _ => AccentColor::Blue,
        }
    }

    /// CSS colour written to the `--accent-color` custom property.
    pub fn hex(&self) -> &'static str {
        match self {
            AccentColor::Blue => "#3b82f6",
            AccentColor::Green => "#10b981",
            AccentColor::Purple => "#8b5cf6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccentColor::Blue => "Blå",
            AccentColor::Green => "Grønn",
            AccentColor::Purple => "Lilla",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationPrefs {
    pub low_stock: bool,
    pub new_orders: bool,
    pub task_deadlines: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            low_stock: true,
            new_orders: true,
            task_deadlines: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub accent: AccentColor,
    pub notifications: NotificationPrefs,
}

fn flag<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> bool {
    store.get(key).as_deref() != Some("false")
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

impl Preferences {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            theme: store
                .get(THEME_KEY)
                .map(|v| Theme::parse(&v))
                .unwrap_or_default(),
            accent: store
                .get(ACCENT_KEY)
                .map(|v| AccentColor::parse(&v))
                .unwrap_or_default(),
            notifications: NotificationPrefs {
                low_stock: flag(store, LOW_STOCK_KEY),
                new_orders: flag(store, NEW_ORDERS_KEY),
                task_deadlines: flag(store, TASK_DEADLINES_KEY),
            },
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) {
        store.set(THEME_KEY, self.theme.as_str());
        store.set(ACCENT_KEY, self.accent.as_str());
        store.set(LOW_STOCK_KEY, bool_str(self.notifications.low_stock));
        store.set(NEW_ORDERS_KEY, bool_str(self.notifications.new_orders));
        store.set(
            TASK_DEADLINES_KEY,
            bool_str(self.notifications.task_deadlines),
        );
    }

    /// Remove every preference entry and return the defaults.
    pub fn reset<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        for key in [
            THEME_KEY,
            ACCENT_KEY,
            LOW_STOCK_KEY,
            NEW_ORDERS_KEY,
            TASK_DEADLINES_KEY,
        ] {
            store.remove(key);
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{save_token, MemoryStore};

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.accent.hex(), "#3b82f6");
        assert!(prefs.notifications.low_stock);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let prefs = Preferences {
            theme: Theme::Dark,
            accent: AccentColor::Purple,
            notifications: NotificationPrefs {
                low_stock: false,
                new_orders: true,
                task_deadlines: false,
            },
        };
        prefs.save(&store);

        assert_eq!(store.get("accentColor").as_deref(), Some("purple"));
        assert_eq!(store.get("notify_lowStock").as_deref(), Some("false"));
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let store = MemoryStore::new();
        store.set("theme", "sepia");
        store.set("accentColor", "orange");
        store.set("notify_newOrders", "no");

        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.accent, AccentColor::Blue);
        // Only the literal "false" disables a notification.
        assert!(prefs.notifications.new_orders);
    }

    #[test]
    fn test_reset_keeps_token() {
        let store = MemoryStore::new();
        save_token(&store, "t");
        Preferences {
            theme: Theme::Dark,
            accent: AccentColor::Green,
            notifications: NotificationPrefs::default(),
        }
        .save(&store);

        let prefs = Preferences::reset(&store);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("token").as_deref(), Some("t"));
    }
}
