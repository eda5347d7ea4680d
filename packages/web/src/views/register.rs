//! Account registration. A successful registration logs straight in.

use dioxus::prelude::*;
use ui::{log_activity, use_activity_log, use_auth, LogLevel};

use crate::Route;

/// Client-side checks before anything is sent.
pub(crate) fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Navn er påkrevd");
    }
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Skriv inn en gyldig e-postadresse");
    }
    if password.is_empty() {
        return Err("Passord er påkrevd");
    }
    if password != confirm {
        return Err("Passordene er ikke like");
    }
    Ok(())
}

#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut log = use_activity_log();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    use_effect(move || {
        if auth.session().is_authenticated() && !auth.session().is_initializing() {
            nav.replace(Route::Dashboard {});
        }
    });

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        let n = name().trim().to_string();
        let e = email().trim().to_string();
        let p = password();
        if let Err(message) = validate_registration(&n, &e, &p, &confirm_password()) {
            error.set(Some(message.to_string()));
            return;
        }
        error.set(None);
        loading.set(true);
        spawn(async move {
            match auth.store().register(&e, &p, &n).await {
                Ok(user) => {
                    log_activity(
                        &mut log,
                        LogLevel::Success,
                        &format!("Konto opprettet for {}", user.email),
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
                onsubmit: handle_register,

                h1 { class: "auth-title", "Opprett konto" }
                p {
                    class: "view-muted",
                    "Har du allerede en konto? "
                    Link { to: Route::Login {}, "Logg inn" }
                }

                if let Some(err) = error() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                label { r#for: "name", class: "settings-label", "Fullt navn" }
                input {
                    id: "name",
                    class: "input",
                    autocomplete: "name",
                    value: "{name}",
                    oninput: move |evt: FormEvent| name.set(evt.value()),
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
                    autocomplete: "new-password",
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                label { r#for: "confirm", class: "settings-label", "Bekreft passord" }
                input {
                    id: "confirm",
                    class: "input",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: "{confirm_password}",
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Oppretter konto..." } else { "Opprett konto" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_rules() {
        assert_eq!(validate_registration(" ", "a@b.no", "pw", "pw"), Err("Navn er påkrevd"));
        assert_eq!(
            validate_registration("Kari", "kari", "pw", "pw"),
            Err("Skriv inn en gyldig e-postadresse")
        );
        assert_eq!(
            validate_registration("Kari", "kari@zenvit.no", "pw", "px"),
            Err("Passordene er ikke like")
        );
        assert!(validate_registration("Kari", "kari@zenvit.no", "pw", "pw").is_ok());
    }
}
