use dioxus::prelude::*;
use ui::{ActivityLogButton, ActivityLogPanel, Navbar, ProtectedRoute, SearchBox, UserMenu};

use crate::Route;

fn nav_items() -> [(&'static str, Route); 9] {
    [
        ("Dashboard", Route::Dashboard {}),
        ("Produkter", Route::Products {}),
        ("Ordrer", Route::Orders {}),
        ("Lager", Route::Stock {}),
        ("Innkjøp", Route::Purchases {}),
        ("Kunder", Route::Customers {}),
        ("Oppgaver", Route::Tasks {}),
        ("Rapporter", Route::Reports {}),
        ("AI", Route::ZenVitAi {}),
    ]
}

/// Shell for every page behind the login.
#[component]
pub fn AppLayout() -> Element {
    let nav = use_navigator();

    rsx! {
        ProtectedRoute {
            redirect: Route::Login {},

            Navbar {
                for (label, route) in nav_items() {
                    Link {
                        key: "{label}",
                        to: route,
                        active_class: "active",
                        "{label}"
                    }
                }
                span { class: "navbar-spacer" }
                SearchBox {
                    on_search: move |q: String| {
                        nav.push(Route::Search { q });
                    },
                }
                Link { to: Route::Settings {}, active_class: "active", "Innstillinger" }
                ActivityLogButton {}
                UserMenu {
                    on_logout: move |_| {
                        nav.replace(Route::Login {});
                    },
                }
            }

            main {
                class: "app-main",
                Outlet::<Route> {}
            }

            ActivityLogPanel {}
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "auth-page",
            h1 { class: "auth-title", "Siden finnes ikke" }
            p { class: "view-muted", "/{path}" }
            Link { to: Route::Dashboard {}, "Til dashboard" }
        }
    }
}
