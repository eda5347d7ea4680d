use dioxus::prelude::*;

use crate::auth::use_auth;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Top bar. The app supplies the links as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Stylesheet { href: NAVBAR_CSS }
        nav {
            class: "navbar",
            span { class: "navbar-brand", "ZenVit" }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}

/// Search field; submits the trimmed query and clears itself. Blank input
/// does nothing.
#[component]
pub fn SearchBox(on_search: EventHandler<String>) -> Element {
    let mut query = use_signal(String::new);

    rsx! {
        form {
            class: "navbar-search",
            role: "search",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let q = query.read().trim().to_string();
                if !q.is_empty() {
                    on_search.call(q);
                    query.set(String::new());
                }
            },
            input {
                class: "input",
                r#type: "search",
                placeholder: "Søk etter produkter, kunder, ordrer...",
                value: "{query}",
                oninput: move |evt: FormEvent| query.set(evt.value()),
            }
        }
    }
}

/// Avatar with the user's name and a logout button.
#[component]
pub fn UserMenu(on_logout: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut open = use_signal(|| false);

    let Some(user) = auth.user() else {
        return rsx! {};
    };
    let initials = user.initials();
    let name = user.display_name().to_string();

    rsx! {
        div {
            class: "user-menu",
            button {
                class: "user-pill",
                onclick: move |_| {
                    let was_open = open();
                    open.set(!was_open);
                },
                span { class: "user-avatar", "{initials}" }
                span { class: "user-name", "{name}" }
            }
            if open() {
                div {
                    class: "user-menu-dropdown",
                    div { class: "user-menu-email", "{user.email}" }
                    button {
                        class: "user-menu-item",
                        onclick: move |_| {
                            open.set(false);
                            auth.logout();
                            on_logout.call(());
                        },
                        "Logg ut"
                    }
                }
            }
        }
    }
}
