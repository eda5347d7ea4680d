//! Expenses and fixed/variable costs. Both are plain schema-driven lists; the
//! summary only adds up the amounts shown.

use api::{kr, Cost, Expense};
use dioxus::prelude::*;
use ui::{use_resource_page, ResourceView};

#[component]
pub fn Expenses() -> Element {
    let handle = use_resource_page::<Expense>();
    let (count, total, unpaid) = {
        let state = handle.page.read();
        let records = state.records();
        (
            records.len(),
            records.iter().map(|e| e.amount).sum::<f64>(),
            records.iter().filter(|e| e.payment_status == "Unpaid").count(),
        )
    };

    rsx! {
        ResourceView::<Expense> {
            handle,
            summary: rsx! {
                div {
                    class: "card-grid",
                    SummaryCard { label: "Registrerte utgifter", value: count.to_string() }
                    SummaryCard { label: "Sum", value: kr(total) }
                    SummaryCard { label: "Ubetalt", value: unpaid.to_string() }
                }
            },
        }
    }
}

#[component]
pub fn Costs() -> Element {
    let handle = use_resource_page::<Cost>();
    let (count, total, recurring) = {
        let state = handle.page.read();
        let records = state.records();
        (
            records.len(),
            records.iter().map(|c| c.amount).sum::<f64>(),
            records.iter().filter(|c| c.recurring).count(),
        )
    };

    rsx! {
        ResourceView::<Cost> {
            handle,
            summary: rsx! {
                div {
                    class: "card-grid",
                    SummaryCard { label: "Registrerte kostnader", value: count.to_string() }
                    SummaryCard { label: "Sum", value: kr(total) }
                    SummaryCard { label: "Faste kostnader", value: recurring.to_string() }
                }
            },
        }
    }
}

#[component]
fn SummaryCard(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "card",
            div { class: "kpi-label", "{label}" }
            div { class: "kpi-value", "{value}" }
        }
    }
}
