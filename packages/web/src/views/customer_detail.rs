use api::{Customer, Lookup};
use dioxus::prelude::*;
use ui::views::{ErrorBanner, LoadingState};
use ui::{use_activity_log, use_auth, use_resource_page};

use super::report_failure;
use crate::Route;

/// Customer card and activity timeline. An id missing from the freshly
/// fetched list shows "Kunde ikke funnet".
#[component]
pub fn CustomerDetail(id: String) -> Element {
    let auth = use_auth();
    let log = use_activity_log();
    let handle = use_resource_page::<Customer>();

    let timeline = use_resource(use_reactive!(|id| async move {
        let store = auth.store();
        let token = store.token();
        store
            .client()
            .customer_timeline(token.as_deref(), &id)
            .await
            .map_err(|err| report_failure(auth, log, &err, "Kunne ikke laste tidslinje"))
    }));

    let state = handle.page.read();
    let customer = match state.lookup(&id) {
        Lookup::Loading => {
            return rsx! {
                LoadingState {}
            }
        }
        Lookup::NotFound => {
            let message = state.error().unwrap_or(state.schema().not_found).to_string();
            return rsx! {
                div { class: "not-found", "{message}" }
                Link { to: Route::Customers {}, "← Tilbake til kunder" }
            };
        }
        Lookup::Found(customer) => customer.clone(),
    };
    drop(state);

    let fields: Vec<(&'static str, String)> = vec![
        ("E-post", dash(&customer.email)),
        ("Telefon", dash(&customer.phone)),
        ("Adresse", dash(&customer.address)),
        (
            "Postnr/By",
            dash(&Some(format!(
                "{} {}",
                customer.zip_code.clone().unwrap_or_default(),
                customer.city.clone().unwrap_or_default()
            ))),
        ),
        ("Type", customer.customer_type.clone()),
        ("Status", customer.status.clone()),
        ("Total verdi", customer.lifetime_value()),
        ("Antall ordrer", customer.order_count.to_string()),
        ("Favorittprodukt", dash(&customer.favorite_product)),
        (
            "Siste ordre",
            customer
                .last_order_date
                .as_deref()
                .map(api::short_date)
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Tagger", dash(&customer.tags)),
        ("Neste steg", dash(&customer.next_step)),
    ];

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "{customer.name}" }
                Link { class: "btn btn-outline", to: Route::Customers {}, "← Tilbake" }
            }

            div {
                class: "detail-grid",
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Kundeinformasjon" }
                    for (label, value) in fields {
                        div {
                            key: "{label}",
                            class: "stat-row",
                            span { "{label}" }
                            strong { "{value}" }
                        }
                    }
                    if let Some(notes) = customer.notes.clone() {
                        p { class: "view-muted", "Merknad: {notes}" }
                    }
                }

                section {
                    class: "card",
                    h2 { class: "view-section-title", "Tidslinje" }
                    {match &*timeline.read() {
                        None => rsx! { LoadingState {} },
                        Some(Err(message)) => rsx! { ErrorBanner { message: message.clone() } },
                        Some(Ok(entries)) if entries.is_empty() => rsx! {
                            p { class: "view-muted", "Ingen aktivitet ennå" }
                        },
                        Some(Ok(entries)) => rsx! {
                            ul {
                                class: "timeline",
                                for entry in entries.iter() {
                                    li {
                                        key: "{entry.id}",
                                        strong { "{api::short_date(&entry.date)} · {entry.entry_type}" }
                                        p { class: "view-muted", "{entry.description}" }
                                    }
                                }
                            }
                        },
                    }}
                }
            }
        }
    }
}

fn dash(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => "-".to_string(),
    }
}
