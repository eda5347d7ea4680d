use api::{kr, ApiError, ReportPeriod};
use dioxus::prelude::*;
use serde_json::Value;
use ui::views::{ErrorBanner, LoadingState};
use ui::{use_activity_log, use_auth};

use super::dashboard::KpiCard;
use super::figures::{count, list, number, text};
use super::report_failure;

/// Daily and monthly reports, both fetched at once and shown as returned.
#[component]
pub fn Reports() -> Element {
    let auth = use_auth();
    let log = use_activity_log();

    let reports = use_resource(move || async move {
        let store = auth.store();
        let token = store.token();
        let client = store.client();
        let (daily, monthly) = futures::join!(
            client.reports(token.as_deref(), ReportPeriod::Daily),
            client.reports(token.as_deref(), ReportPeriod::Monthly),
        );
        let mut error = None;
        let mut settle = |result: Result<Value, ApiError>| {
            result.unwrap_or_else(|err| {
                error = Some(report_failure(auth, log, &err, "Kunne ikke laste rapporter"));
                Value::Null
            })
        };
        let daily = settle(daily);
        let monthly = settle(monthly);
        (daily, monthly, error)
    });

    let Some((daily, monthly, error)) = reports.read().clone() else {
        return rsx! {
            LoadingState {}
        };
    };

    let top_products: Vec<(String, i64, f64)> = list(&monthly, &["top_products"])
        .iter()
        .map(|p| (text(p, &["name"]), count(p, &["quantity"]), number(p, &["revenue"])))
        .collect();
    let top_customers: Vec<(String, i64, f64)> = list(&monthly, &["top_customers"])
        .iter()
        .map(|c| (text(c, &["name"]), count(c, &["orders"]), number(c, &["revenue"])))
        .collect();

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Rapporter" }

            if let Some(message) = error {
                ErrorBanner { message }
            }

            h2 { class: "view-section-title", "{ReportPeriod::Daily.label()}" }
            div {
                class: "card-grid",
                KpiCard { label: "Salg i dag", value: kr(number(&daily, &["daily_sales"])), sub: "" }
                KpiCard { label: "Profit i dag", value: kr(number(&daily, &["daily_profit"])), sub: "" }
                KpiCard { label: "Ordrer i dag", value: count(&daily, &["orders_today"]).to_string(), sub: "" }
                KpiCard { label: "Lavt lager", value: count(&daily, &["low_stock_count"]).to_string(), sub: "" }
            }

            h2 { class: "view-section-title", "{ReportPeriod::Monthly.label()}" }
            div {
                class: "card-grid",
                KpiCard { label: "Salg denne måneden", value: kr(number(&monthly, &["monthly_sales"])), sub: "" }
                KpiCard { label: "Profit denne måneden", value: kr(number(&monthly, &["monthly_profit"])), sub: "" }
                KpiCard { label: "Antall ordrer", value: count(&monthly, &["orders_count"]).to_string(), sub: "" }
            }

            div {
                class: "detail-grid",
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Top 10 produkter" }
                    RankingTable { heading: "Produkt", count_heading: "Antall", rows: top_products }
                }
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Top 10 kunder" }
                    RankingTable { heading: "Kunde", count_heading: "Ordrer", rows: top_customers }
                }
            }
        }
    }
}

#[component]
fn RankingTable(
    heading: &'static str,
    count_heading: &'static str,
    rows: Vec<(String, i64, f64)>,
) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "view-muted", "Ingen data for perioden" }
        };
    }
    rsx! {
        table {
            class: "data-table",
            thead {
                tr {
                    th { "{heading}" }
                    th { "{count_heading}" }
                    th { "Omsetning" }
                }
            }
            tbody {
                for (i, (name, n, revenue)) in rows.into_iter().enumerate() {
                    tr {
                        key: "{i}",
                        td { "{name}" }
                        td { "{n}" }
                        td { "{kr(revenue)}" }
                    }
                }
            }
        }
    }
}
