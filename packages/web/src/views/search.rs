use api::{kr, short_id, SearchResults};
use dioxus::prelude::*;
use ui::views::{EmptyState, ErrorBanner, LoadingState};
use ui::{use_activity_log, use_auth, SearchBox};

use super::report_failure;
use crate::Route;

/// Cross-entity search. The query goes to the backend as is; the groups are
/// rendered in the order returned.
#[component]
pub fn Search(q: String) -> Element {
    let auth = use_auth();
    let log = use_activity_log();
    let nav = use_navigator();

    let results = use_resource(use_reactive!(|q| async move {
        let store = auth.store();
        let token = store.token();
        store
            .client()
            .search(token.as_deref(), &q)
            .await
            .map_err(|err| report_failure(auth, log, &err, "Søket feilet"))
    }));

    let query = q.trim().to_string();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                div {
                    h1 { class: "view-title", "Søk" }
                    p { class: "view-muted", "Søk på tvers av produkter, kunder, ordrer og oppgaver" }
                }
                SearchBox {
                    on_search: move |q: String| {
                        nav.push(Route::Search { q });
                    },
                }
            }

            if query.is_empty() {
                EmptyState { message: "Skriv inn et søkeord" }
            } else {
                {match &*results.read() {
                    None => rsx! { LoadingState {} },
                    Some(Err(message)) => rsx! { ErrorBanner { message: message.clone() } },
                    Some(Ok(found)) if found.is_empty() => rsx! {
                        EmptyState { message: format!("Ingen treff for «{query}»") }
                    },
                    Some(Ok(found)) => rsx! {
                        p { class: "view-muted", "{found.total()} treff for «{query}»" }
                        Groups { results: found.clone() }
                    },
                }}
            }
        }
    }
}

#[component]
fn Groups(results: SearchResults) -> Element {
    rsx! {
        if !results.products.is_empty() {
            section {
                class: "card search-group",
                h2 { "Produkter ({results.products.len()})" }
                for p in results.products.iter() {
                    div {
                        key: "{p.id}",
                        class: "stat-row",
                        Link { to: Route::ProductDetail { id: p.id.clone() }, "{p.name}" }
                        span { class: "view-muted", "{p.sku} · {kr(p.unit_price())}" }
                    }
                }
            }
        }
        if !results.customers.is_empty() {
            section {
                class: "card search-group",
                h2 { "Kunder ({results.customers.len()})" }
                for c in results.customers.iter() {
                    div {
                        key: "{c.id}",
                        class: "stat-row",
                        Link { to: Route::CustomerDetail { id: c.id.clone() }, "{c.name}" }
                        span { class: "view-muted", "{c.email.clone().unwrap_or_default()}" }
                    }
                }
            }
        }
        if !results.orders.is_empty() {
            section {
                class: "card search-group",
                h2 { "Ordrer ({results.orders.len()})" }
                for o in results.orders.iter() {
                    div {
                        key: "{o.id}",
                        class: "stat-row",
                        Link { to: Route::Orders {}, "#{short_id(&o.id)} · {o.customer_name}" }
                        span { class: "view-muted", "{o.status} · {kr(o.order_total)}" }
                    }
                }
            }
        }
        if !results.tasks.is_empty() {
            section {
                class: "card search-group",
                h2 { "Oppgaver ({results.tasks.len()})" }
                for t in results.tasks.iter() {
                    div {
                        key: "{t.id}",
                        class: "stat-row",
                        Link { to: Route::Tasks {}, "{t.title}" }
                        span { class: "view-muted", "{t.status} · {t.priority}" }
                    }
                }
            }
        }
    }
}
