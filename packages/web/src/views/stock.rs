use api::{kr, Record, StockItem, StockMovement, StockSummary};
use dioxus::prelude::*;
use ui::{use_resource_page, ResourceView};

use crate::Route;

#[component]
pub fn Stock() -> Element {
    let handle = use_resource_page::<StockItem>();
    let page = handle.page;
    let summary = StockSummary::of(page.read().records());

    rsx! {
        ResourceView::<StockItem> {
            handle,
            header_actions: rsx! {
                Link { class: "btn btn-outline", to: Route::StockMovements {}, "Lagerbevegelser" }
                Link { class: "btn btn-primary", to: Route::StockAdjustment {}, "Juster lager" }
            },
            summary: rsx! {
                div {
                    class: "card-grid",
                    div {
                        class: "card",
                        div { class: "kpi-label", "Enheter på lager" }
                        div { class: "kpi-value", "{summary.total_quantity}" }
                    }
                    div {
                        class: "card",
                        div { class: "kpi-label", "Lagerverdi" }
                        div { class: "kpi-value", "{kr(summary.total_value)}" }
                    }
                    div {
                        class: "card",
                        div { class: "kpi-label", "Lavt lager" }
                        div { class: "kpi-value", "{summary.low_count}" }
                    }
                }
            },
            row_class: move |id: String| {
                let low = page
                    .read()
                    .records()
                    .iter()
                    .any(|s| s.id() == id && s.is_low());
                if low { "low".to_string() } else { String::new() }
            },
        }
    }
}

#[component]
pub fn StockMovements() -> Element {
    let handle = use_resource_page::<StockMovement>();
    rsx! {
        ResourceView::<StockMovement> {
            handle,
            header_actions: rsx! {
                Link { class: "btn btn-outline", to: Route::Stock {}, "Tilbake til lager" }
            },
        }
    }
}
