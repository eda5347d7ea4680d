use api::resource::schema::ORDER_STATUSES;
use api::{kr, short_date, Order, Record};
use dioxus::prelude::*;
use ui::views::ModalOverlay;
use ui::{use_resource_page, ResourceView};

use crate::Route;

/// Order list. Status changes go through the status endpoint; new orders
/// have their own line-item page.
#[component]
pub fn Orders() -> Element {
    let handle = use_resource_page::<Order>();
    let page = handle.page;
    let mut open = use_signal(|| Option::<Order>::None);

    rsx! {
        ResourceView::<Order> {
            handle,
            header_actions: rsx! {
                Link { class: "btn btn-primary", to: Route::NewOrder {}, "+ Ny ordre" }
            },
            on_open: move |id: String| {
                let order = page.read().records().iter().find(|o| o.id() == id).cloned();
                open.set(order);
            },
            row_actions: move |id: String| {
                let current = page
                    .read()
                    .records()
                    .iter()
                    .find(|o| o.id() == id)
                    .map(|o| o.status.clone())
                    .unwrap_or_default();
                rsx! {
                    select {
                        class: "input",
                        "aria-label": "Status",
                        value: "{current}",
                        onchange: move |evt: FormEvent| handle.set_status(id.clone(), evt.value()),
                        for (value, label) in ORDER_STATUSES.iter() {
                            option {
                                key: "{value}",
                                value: "{value}",
                                selected: current == *value,
                                "{label}"
                            }
                        }
                    }
                }
            },
        }

        if let Some(order) = open() {
            OrderDetails { order, on_close: move |_| open.set(None) }
        }
    }
}

/// Lines and totals exactly as the backend computed them.
#[component]
fn OrderDetails(order: Order, on_close: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            wide: true,
            div {
                class: "modal-body",
                h2 { class: "modal-title", "{order.title()}" }
                p { class: "view-muted", "{order.customer_name} · {short_date(&order.date)} · {order.channel}" }
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Produkt" }
                            th { "Antall" }
                            th { "Pris" }
                            th { "Sum" }
                        }
                    }
                    tbody {
                        for (i, line) in order.items.iter().enumerate() {
                            tr {
                                key: "{i}",
                                td { "{line.product_name}" }
                                td { "{line.quantity}" }
                                td { "{kr(line.sale_price)}" }
                                td { "{kr(line.line_total)}" }
                            }
                        }
                    }
                }
                div {
                    class: "stat-row",
                    span { "Totalt" }
                    strong { "{kr(order.order_total)}" }
                }
                div {
                    class: "stat-row",
                    span { "Fortjeneste" }
                    strong { "{kr(order.profit)} ({order.profit_percent:.1} %)" }
                }
                if let Some(notes) = order.notes.clone() {
                    p { class: "view-muted", "{notes}" }
                }
                div {
                    class: "modal-actions",
                    button { class: "btn btn-outline", onclick: move |_| on_close.call(()), "Lukk" }
                }
            }
        }
    }
}
