use api::{kr, DashboardView};
use dioxus::prelude::*;
use serde_json::Value;
use ui::views::{ErrorBanner, LoadingState};
use ui::{use_activity_log, use_auth};

use super::figures::{count, list, number, text};
use super::report_failure;
use crate::Route;

#[derive(Clone, PartialEq)]
struct DashboardData {
    stats: Value,
    monthly: Value,
    kpis: Value,
    errors: Vec<String>,
}

/// Today's figures, inventory and the month so far, as computed by the
/// backend. The three requests run concurrently.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let log = use_activity_log();

    let data = use_resource(move || async move {
        let store = auth.store();
        let token = store.token();
        let client = store.client();
        let (stats, monthly, kpis) = futures::join!(
            client.dashboard(token.as_deref(), DashboardView::Stats),
            client.dashboard(token.as_deref(), DashboardView::Monthly),
            client.dashboard(token.as_deref(), DashboardView::Kpis),
        );

        let mut errors = Vec::new();
        let mut settle = |result: Result<Value, api::ApiError>| match result {
            Ok(value) => value,
            Err(err) => {
                errors.push(report_failure(auth, log, &err, "Kunne ikke laste dashboard"));
                Value::Null
            }
        };
        let stats = settle(stats);
        let monthly = settle(monthly);
        let kpis = settle(kpis);
        DashboardData {
            stats,
            monthly,
            kpis,
            errors,
        }
    });

    let Some(data) = data.read().clone() else {
        return rsx! {
            LoadingState {}
        };
    };
    let stats = &data.stats;
    let monthly = &data.monthly;
    let kpis = &data.kpis;

    let low_items: Vec<(String, i64)> = list(stats, &["inventory", "items"])
        .iter()
        .map(|item| (text(item, &["product_name"]), count(item, &["quantity"])))
        .collect();
    let top_products: Vec<(String, f64)> = list(monthly, &["top_products"])
        .iter()
        .map(|p| (text(p, &["name"]), number(p, &["percentage"])))
        .collect();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Dashboard" }
                div {
                    class: "view-header-actions",
                    Link { class: "btn btn-primary", to: Route::NewOrder {}, "+ Ny ordre" }
                    Link { class: "btn btn-outline", to: Route::NewPurchase {}, "+ Nytt innkjøp" }
                }
            }

            if let Some(message) = data.errors.first() {
                ErrorBanner { message: message.clone() }
            }

            div {
                class: "card-grid",
                KpiCard {
                    label: "Dagens salg",
                    value: format!("{} ordrer", count(stats, &["today", "orders"])),
                    sub: format!("Oms. i dag: {}", kr(number(stats, &["today", "revenue"]))),
                }
                KpiCard {
                    label: "Dagens profit (est.)",
                    value: kr(number(stats, &["today", "profit"])),
                    sub: "Etter varekost, før faste kostn.",
                }
                KpiCard {
                    label: "Lagerverdi",
                    value: kr(number(stats, &["inventory", "total_value"])),
                    sub: "Basert på innkjøpspris.",
                }
                KpiCard {
                    label: "Lavt lager",
                    value: format!("{} produkter", count(stats, &["inventory", "low_stock_count"])),
                    sub: "Trenger innkjøp i løpet av uken.",
                }
            }

            div {
                class: "card-grid",
                KpiCard {
                    label: "Produkter totalt",
                    value: count(kpis, &["kpis", "total_products"]).to_string(),
                    sub: "Aktive produkter i systemet",
                }
                KpiCard {
                    label: "Salg denne måneden",
                    value: count(kpis, &["kpis", "sales_this_month", "count"]).to_string(),
                    sub: format!("{} omsetning", kr(number(kpis, &["kpis", "sales_this_month", "revenue"]))),
                }
                KpiCard {
                    label: "Innkjøp på vei",
                    value: count(kpis, &["kpis", "incoming_purchases"]).to_string(),
                    sub: "Bestillinger underveis",
                }
            }

            div {
                class: "detail-grid",
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Denne måneden" }
                    StatRow { label: "Omsetning", value: kr(number(monthly, &["revenue"])) }
                    StatRow { label: "Varekost", value: kr(number(monthly, &["cogs"])) }
                    StatRow { label: "Andre kostnader", value: kr(number(monthly, &["other_costs"])) }
                    StatRow { label: "Resultat", value: kr(number(monthly, &["profit"])) }
                }
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Toppselgere" }
                    if top_products.is_empty() {
                        p { class: "view-muted", "Ingen salg denne måneden" }
                    }
                    for (name, share) in top_products {
                        StatRow { key: "{name}", label: name.clone(), value: format!("{share:.0} %") }
                    }
                }
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Lagerstatus" }
                    if low_items.is_empty() {
                        p { class: "view-muted", "Ingen varer å vise" }
                    }
                    for (name, quantity) in low_items {
                        StatRow { key: "{name}", label: name.clone(), value: format!("{quantity} stk") }
                    }
                    Link { to: Route::Stock {}, "Gå til lager" }
                }
            }
        }
    }
}

#[component]
pub(crate) fn KpiCard(label: String, value: String, sub: String) -> Element {
    rsx! {
        article {
            class: "card",
            div { class: "kpi-label", "{label}" }
            div { class: "kpi-value", "{value}" }
            div { class: "view-muted", "{sub}" }
        }
    }
}

#[component]
pub(crate) fn StatRow(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-row",
            span { "{label}" }
            strong { "{value}" }
        }
    }
}
