use api::{kr, short_date, Lookup, Product, ResourceKind};
use dioxus::prelude::*;
use ui::views::{ErrorBanner, LoadingState};
use ui::{use_activity_log, use_auth, use_resource_page};

use super::report_failure;
use crate::Route;

/// Movements shown under a product.
const RECENT_MOVEMENTS: usize = 10;

#[component]
pub fn ProductDetail(id: String) -> Element {
    let auth = use_auth();
    let log = use_activity_log();
    let handle = use_resource_page::<Product>();

    let movements = use_resource(use_reactive!(|id| async move {
        let store = auth.store();
        let token = store.token();
        store
            .client()
            .stock_movements_for(token.as_deref(), &id)
            .await
            .map_err(|err| report_failure(auth, log, &err, "Kunne ikke laste lagerbevegelser"))
    }));

    let state = handle.page.read();
    let schema = state.schema();
    let product = match state.lookup(&id) {
        Lookup::Loading => {
            return rsx! {
                LoadingState {}
            }
        }
        Lookup::NotFound => {
            let message = state.error().unwrap_or(schema.not_found).to_string();
            return rsx! {
                div { class: "not-found", "{message}" }
                Link { to: Route::Products {}, "← Tilbake til produkter" }
            };
        }
        Lookup::Found(product) => product.clone(),
    };
    let supplier = product
        .supplier_id
        .as_deref()
        .and_then(|s| state.references().label(ResourceKind::Suppliers, s))
        .unwrap_or("-")
        .to_string();
    drop(state);

    let image = product
        .image_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(|u| auth.asset_url(u));

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                div {
                    h1 { class: "view-title", "{product.name}" }
                    p { class: "view-muted", "SKU: {product.sku} · {product.category}" }
                }
                div {
                    class: "view-header-actions",
                    Link { class: "btn btn-outline", to: Route::Products {}, "← Tilbake" }
                    Link {
                        class: "btn btn-primary",
                        to: Route::EditProduct { id: product.id.clone() },
                        "Rediger"
                    }
                }
            }

            div {
                class: "detail-grid",
                section {
                    class: "card",
                    if let Some(src) = image {
                        img { class: "detail-image", src: "{src}", alt: "{product.name}" }
                    }
                    if let Some(description) = product.description.clone() {
                        h2 { class: "view-section-title", "Beskrivelse" }
                        p { "{description}" }
                    }
                }
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Prising" }
                    Row { label: "Salgspris", value: kr(product.unit_price()) }
                    Row { label: "Innkjøpspris", value: kr(product.unit_cost()) }
                    h2 { class: "view-section-title", "Lagerstatus" }
                    Row {
                        label: "På lager",
                        value: product.stock_quantity.map(|q| format!("{q} stk")).unwrap_or_else(|| "-".to_string()),
                    }
                    Row {
                        label: "Minimum lager",
                        value: product.min_stock.map(|q| format!("{q} stk")).unwrap_or_else(|| "-".to_string()),
                    }
                }
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Produktdetaljer" }
                    Row { label: "Merke", value: product.brand.clone().unwrap_or_else(|| "-".to_string()) }
                    Row { label: "EAN", value: product.ean.clone().unwrap_or_else(|| "-".to_string()) }
                    Row { label: "Leverandør", value: supplier }
                    Row { label: "Aktiv", value: if product.active { "Ja".to_string() } else { "Nei".to_string() } }
                }
            }

            section {
                class: "card",
                h2 { class: "view-section-title", "Lagerbevegelser (siste {RECENT_MOVEMENTS})" }
                {match &*movements.read() {
                    None => rsx! { LoadingState {} },
                    Some(Err(message)) => rsx! { ErrorBanner { message: message.clone() } },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        p { class: "view-muted", "Ingen lagerbevegelser ennå" }
                    },
                    Some(Ok(list)) => rsx! {
                        table {
                            class: "data-table",
                            thead {
                                tr {
                                    th { "Dato" }
                                    th { "Type" }
                                    th { "Mengde" }
                                    th { "Referanse" }
                                    th { "Merknad" }
                                }
                            }
                            tbody {
                                for m in list.iter().take(RECENT_MOVEMENTS) {
                                    tr {
                                        key: "{m.id}",
                                        td { "{short_date(&m.date)}" }
                                        td {
                                            span {
                                                class: if m.is_inbound() { "badge badge-in" } else { "badge badge-out" },
                                                if m.is_inbound() { "Inn" } else { "Ut" }
                                            }
                                        }
                                        td { "{m.quantity}" }
                                        td { "{m.reference()}" }
                                        td { "{m.note.clone().unwrap_or_default()}" }
                                    }
                                }
                            }
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn Row(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "stat-row",
            span { "{label}" }
            strong { "{value}" }
        }
    }
}
