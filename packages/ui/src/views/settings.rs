use dioxus::prelude::*;
use store::{AccentColor, Preferences, Theme};

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::auth::use_auth;
use crate::theme::{reset_preferences, save_preferences, use_preferences};
use crate::views::ConfirmDialog;

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Profile, appearance, notification flags and reset. Every change is saved
/// to local storage immediately.
#[component]
pub fn SettingsView() -> Element {
    let auth = use_auth();
    let prefs = use_preferences();
    let mut log = use_activity_log();
    let mut confirm_reset = use_signal(|| false);

    let current = *prefs.read();
    let user = auth.user();

    let update = move |next: Preferences| save_preferences(auth, prefs, next);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page max-w-3xl",

            h1 { class: "view-title", "Innstillinger" }

            section {
                class: "settings-section",
                h2 { class: "view-section-title", "Profilinformasjon" }
                if let Some(user) = user {
                    div {
                        class: "settings-grid",
                        SettingsField { label: "Fullt navn", value: user.full_name.clone() }
                        SettingsField { label: "E-post", value: user.email.clone() }
                        SettingsField { label: "Rolle", value: user.role.clone() }
                    }
                }
            }

            section {
                class: "settings-section",
                h2 { class: "view-section-title", "Utseende og tema" }
                div {
                    class: "settings-row",
                    span { class: "settings-label", "Tema" }
                    div {
                        class: "flex gap-3",
                        for theme in Theme::ALL {
                            button {
                                key: "{theme.as_str()}",
                                class: if current.theme == theme { "theme-card theme-card-active" } else { "theme-card" },
                                onclick: move |_| update(Preferences { theme, ..current }),
                                "{theme.label()}"
                            }
                        }
                    }
                }
                div {
                    class: "settings-row",
                    span { class: "settings-label", "Aksentfarge" }
                    div {
                        class: "flex gap-3",
                        for accent in AccentColor::ALL {
                            button {
                                key: "{accent.as_str()}",
                                class: if current.accent == accent { "accent-swatch active" } else { "accent-swatch" },
                                style: "background-color: {accent.hex()}",
                                title: "{accent.label()}",
                                onclick: move |_| update(Preferences { accent, ..current }),
                            }
                        }
                    }
                }
            }

            section {
                class: "settings-section",
                h2 { class: "view-section-title", "Varslingsinnstillinger" }
                Toggle {
                    label: "Lavt lagernivå",
                    description: "Varsle når et produkt går under minimumsnivå",
                    checked: current.notifications.low_stock,
                    on_change: move |on: bool| {
                        let mut next = current;
                        next.notifications.low_stock = on;
                        update(next);
                    },
                }
                Toggle {
                    label: "Nye ordrer",
                    description: "Varsle når en ny ordre kommer inn",
                    checked: current.notifications.new_orders,
                    on_change: move |on: bool| {
                        let mut next = current;
                        next.notifications.new_orders = on;
                        update(next);
                    },
                }
                Toggle {
                    label: "Oppgavefrister",
                    description: "Påminnelse før en oppgave forfaller",
                    checked: current.notifications.task_deadlines,
                    on_change: move |on: bool| {
                        let mut next = current;
                        next.notifications.task_deadlines = on;
                        update(next);
                    },
                }
            }

            section {
                class: "settings-section",
                h2 { class: "view-section-title", "Data" }
                p {
                    class: "view-muted",
                    "Innstillingene lagres lokalt i nettleseren. Forretningsdata ligger på serveren."
                }
                button {
                    class: "btn btn-danger-outline",
                    onclick: move |_| confirm_reset.set(true),
                    "Tilbakestill innstillinger"
                }
            }
        }

        if confirm_reset() {
            ConfirmDialog {
                title: "Tilbakestill innstillinger",
                message: "Er du sikker på at du vil tilbakestille alle innstillinger?",
                confirm_label: "Tilbakestill",
                on_confirm: move |_| {
                    reset_preferences(auth, prefs);
                    log_activity(&mut log, LogLevel::Success, "Innstillinger tilbakestilt");
                    confirm_reset.set(false);
                },
                on_cancel: move |_| confirm_reset.set(false),
            }
        }
    }
}

#[component]
fn SettingsField(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "settings-field",
            span { class: "settings-label", "{label}" }
            input { class: "input", readonly: true, value: "{value}" }
        }
    }
}

#[component]
fn Toggle(
    label: &'static str,
    description: &'static str,
    checked: bool,
    on_change: EventHandler<bool>,
) -> Element {
    rsx! {
        label {
            class: "toggle-row",
            div {
                span { class: "settings-label", "{label}" }
                p { class: "view-muted", "{description}" }
            }
            input {
                r#type: "checkbox",
                class: "toggle-switch",
                checked,
                onchange: move |evt: FormEvent| on_change.call(evt.checked()),
            }
        }
    }
}
