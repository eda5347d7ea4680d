use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogLevel};

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

fn level_class(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "activity-log-entry error",
        LogLevel::Warning => "activity-log-entry warning",
        LogLevel::Success => "activity-log-entry success",
        LogLevel::Info => "activity-log-entry info",
    }
}

/// Request outcomes reported by the pages, newest first.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    let (rows, errors_only, total, errors) = {
        let current = log.read();
        if !current.visible {
            return rsx! {};
        }
        let rows: Vec<_> = current
            .shown()
            .into_iter()
            .map(|e| (level_class(e.level), e.timestamp.clone(), e.message.clone()))
            .collect();
        (rows, current.errors_only, current.entries.len(), current.error_count())
    };

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        aside {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                div {
                    class: "activity-log-tabs",
                    button {
                        class: if !errors_only { "active" } else { "" },
                        onclick: move |_| log.write().errors_only = false,
                        "Alle ({total})"
                    }
                    button {
                        class: if errors_only { "active" } else { "" },
                        onclick: move |_| log.write().errors_only = true,
                        "Feil ({errors})"
                    }
                }
                div {
                    class: "activity-log-header-actions",
                    button { onclick: move |_| log.write().clear(), "Tøm" }
                    button { onclick: move |_| log.write().toggle(), "Lukk" }
                }
            }
            div {
                class: "activity-log-entries",
                if rows.is_empty() {
                    div {
                        class: "activity-log-empty",
                        if errors_only { "Ingen feil registrert" } else { "Ingen aktivitet ennå" }
                    }
                }
                for (i, (class, time, message)) in rows.into_iter().enumerate() {
                    div {
                        key: "{i}",
                        class,
                        span { class: "activity-log-time", "{time}" }
                        span { " {message}" }
                    }
                }
            }
        }
    }
}

/// Navbar entry that opens the panel; counts failures not yet looked at.
#[component]
pub fn ActivityLogButton() -> Element {
    let mut log = use_activity_log();
    let unseen = log.read().unseen_errors();
    let open = log.read().visible;

    rsx! {
        button {
            class: if open { "activity-log-button active" } else { "activity-log-button" },
            title: "Aktivitetslogg",
            onclick: move |_| log.write().toggle(),
            "Logg"
            if unseen > 0 {
                span { class: "activity-log-badge", "{unseen}" }
            }
        }
    }
}
