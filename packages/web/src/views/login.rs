//! Email/password login.

use dioxus::prelude::*;
use ui::{log_activity, use_activity_log, use_auth, LogLevel};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut log = use_activity_log();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in (restored token or just logged in).
    use_effect(move || {
        if auth.session().is_authenticated() && !auth.session().is_initializing() {
            nav.replace(Route::Dashboard {});
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        let e = email().trim().to_string();
        let p = password();
        if e.is_empty() || p.is_empty() {
            error.set(Some("Fyll inn e-post og passord".to_string()));
            return;
        }
        error.set(None);
        loading.set(true);
        spawn(async move {
            let store = auth.store();
            match store.login(&e, &p).await {
                Ok(user) => {
                    log_activity(
                        &mut log,
                        LogLevel::Success,
                        &format!("Logget inn som {}", user.display_name()),
                    );
                    nav.replace(Route::Dashboard {});
                }
                Err(message) => error.set(Some(message)),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: handle_login,

                h1 { class: "auth-title", "Logg inn på ZenVit CRM" }
                p {
                    class: "view-muted",
                    "Eller "
                    Link { to: Route::Register {}, "opprett ny konto" }
                }

                if let Some(err) = error() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                label { r#for: "email", class: "settings-label", "E-post" }
                input {
                    id: "email",
                    class: "input",
                    r#type: "email",
                    autocomplete: "email",
                    placeholder: "din@epost.no",
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                label { r#for: "password", class: "settings-label", "Passord" }
                input {
                    id: "password",
                    class: "input",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logger inn..." } else { "Logg inn" }
                }
            }
        }
    }
}
