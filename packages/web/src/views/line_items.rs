//! New orders and purchases: a counterparty plus product lines.
//!
//! Picking a product fills in its price from the product list the page has
//! already fetched, and the total is recomputed from the draft on every
//! render. Nothing is sent until the form is submitted.

use api::resource::schema::{ORDER_CHANNELS, PAYMENT_METHODS};
use api::{
    kr, Customer, LineItemsDraft, LineItemsError, LinePricing, Product, RefOption, ResourceKind,
};
use dioxus::prelude::*;
use serde_json::Value;
use ui::views::{ErrorBanner, LoadingState};
use ui::{log_activity, use_activity_log, use_auth, use_resource_page, ActivityLog, AuthContext, LogLevel};

use super::report_failure;
use crate::Route;

/// In-flight flag and inline error for a line-item form.
#[derive(Clone, Copy)]
struct Submission {
    auth: AuthContext,
    log: Signal<ActivityLog>,
    submitting: Signal<bool>,
    error: Signal<Option<String>>,
}

fn use_submission() -> Submission {
    Submission {
        auth: use_auth(),
        log: use_activity_log(),
        submitting: use_signal(|| false),
        error: use_signal(|| None),
    }
}

impl Submission {
    /// Create the record once. Invalid drafts never reach the backend, and a
    /// second submit while the first is in flight is ignored.
    fn send(
        self,
        kind: ResourceKind,
        payload: Result<Value, LineItemsError>,
        success: &'static str,
        on_done: impl FnOnce() + 'static,
    ) {
        let Submission {
            auth,
            mut log,
            mut submitting,
            mut error,
        } = self;
        if submitting() {
            return;
        }
        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        submitting.set(true);
        spawn(async move {
            let store = auth.store();
            let token = store.token();
            let result = store.client().create(token.as_deref(), kind, &payload).await;
            submitting.set(false);
            match result {
                Ok(_) => {
                    log_activity(&mut log, LogLevel::Success, success);
                    on_done();
                }
                Err(err) => {
                    error.set(Some(report_failure(auth, log, &err, "Kunne ikke lagre")));
                }
            }
        });
    }
}

#[component]
pub fn NewOrder() -> Element {
    let products = use_resource_page::<Product>();
    let customers = use_resource_page::<Customer>();
    let nav = use_navigator();
    let mut draft = use_signal(|| LineItemsDraft::new(LinePricing::Sale));
    let submission = use_submission();

    let (loaded, load_error, product_list, customer_options) = {
        let p = products.page.read();
        let c = customers.page.read();
        let options: Vec<RefOption> = c
            .records()
            .iter()
            .map(|cu| RefOption {
                id: cu.id.clone(),
                label: cu.name.clone(),
            })
            .collect();
        (
            p.is_loaded() && c.is_loaded(),
            p.error().or(c.error()).map(str::to_string),
            p.records().to_vec(),
            options,
        )
    };
    if !loaded {
        return rsx! {
            LoadingState {}
        };
    }

    let current = draft();
    let submitting = (submission.submitting)();
    let catalog = product_list.clone();

    rsx! {
        div {
            class: "view-page max-w-3xl",
            div {
                class: "view-header",
                h1 { class: "view-title", "Ny ordre" }
                Link { class: "btn btn-outline", to: Route::Orders {}, "← Tilbake" }
            }

            if let Some(message) = load_error {
                ErrorBanner { message }
            }

            form {
                class: "card modal-body",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let payload = draft.read().to_order_payload(&catalog);
                    submission.send(ResourceKind::Orders, payload, "Ordre opprettet", move || {
                        nav.push(Route::Orders {});
                    });
                },

                if let Some(err) = (submission.error)() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                div {
                    class: "form-grid",
                    CounterpartySelect {
                        label: "Kunde",
                        value: current.counterparty.clone(),
                        options: customer_options,
                        on_change: move |id: String| draft.write().counterparty = id,
                    }
                    div {
                        class: "form-field",
                        label { r#for: "channel", "Kanal" }
                        select {
                            id: "channel",
                            class: "input",
                            value: "{current.channel}",
                            onchange: move |evt: FormEvent| draft.write().channel = evt.value(),
                            for (value, label) in ORDER_CHANNELS.iter() {
                                option { key: "{value}", value: "{value}", selected: current.channel == *value, "{label}" }
                            }
                        }
                    }
                    div {
                        class: "form-field",
                        label { r#for: "payment", "Betalingsmetode" }
                        select {
                            id: "payment",
                            class: "input",
                            value: "{current.payment_method}",
                            onchange: move |evt: FormEvent| draft.write().payment_method = evt.value(),
                            option { value: "", "Velg..." }
                            for (value, label) in PAYMENT_METHODS.iter() {
                                option { key: "{value}", value: "{value}", selected: current.payment_method == *value, "{label}" }
                            }
                        }
                    }
                }

                LineEditor { draft, products: product_list, price_label: "Salgspris" }

                NotesField { value: current.notes.clone(), on_change: move |v: String| draft.write().notes = v }

                div {
                    class: "modal-actions",
                    Link { class: "btn btn-outline", to: Route::Orders {}, "Avbryt" }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Lagrer..." } else { "Opprett ordre" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn NewPurchase() -> Element {
    // The product page already carries the supplier options for its form.
    let products = use_resource_page::<Product>();
    let nav = use_navigator();
    let mut draft = use_signal(|| LineItemsDraft::new(LinePricing::Cost));
    let submission = use_submission();

    let (loaded, load_error, product_list, supplier_options) = {
        let p = products.page.read();
        (
            p.is_loaded(),
            p.error().map(str::to_string),
            p.records().to_vec(),
            p.references().options(ResourceKind::Suppliers).to_vec(),
        )
    };
    if !loaded {
        return rsx! {
            LoadingState {}
        };
    }

    let current = draft();
    let submitting = (submission.submitting)();
    let catalog = product_list.clone();

    rsx! {
        div {
            class: "view-page max-w-3xl",
            div {
                class: "view-header",
                div {
                    h1 { class: "view-title", "Nytt innkjøp" }
                    p { class: "view-muted", "Registrer nytt produktinnkjøp" }
                }
                Link { class: "btn btn-outline", to: Route::Purchases {}, "← Tilbake" }
            }

            if let Some(message) = load_error {
                ErrorBanner { message }
            }

            form {
                class: "card modal-body",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let payload = draft.read().to_purchase_payload(&catalog);
                    submission.send(ResourceKind::Purchases, payload, "Innkjøp opprettet", move || {
                        nav.push(Route::Purchases {});
                    });
                },

                if let Some(err) = (submission.error)() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                div {
                    class: "form-grid",
                    CounterpartySelect {
                        label: "Leverandør",
                        value: current.counterparty.clone(),
                        options: supplier_options,
                        on_change: move |id: String| draft.write().counterparty = id,
                    }
                }

                LineEditor { draft, products: product_list, price_label: "Innkjøpspris" }

                NotesField { value: current.notes.clone(), on_change: move |v: String| draft.write().notes = v }

                div {
                    class: "modal-actions",
                    Link { class: "btn btn-outline", to: Route::Purchases {}, "Avbryt" }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Lagrer..." } else { "Opprett innkjøp" }
                    }
                }
            }
        }
    }
}

#[component]
fn CounterpartySelect(
    label: &'static str,
    value: String,
    options: Vec<RefOption>,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "form-field",
            label {
                r#for: "counterparty",
                "{label}"
                span { class: "required", " *" }
            }
            select {
                id: "counterparty",
                class: "input",
                value: "{value}",
                onchange: move |evt: FormEvent| on_change.call(evt.value()),
                option { value: "", "Velg..." }
                for opt in options.iter() {
                    option { key: "{opt.id}", value: "{opt.id}", selected: value == opt.id, "{opt.label}" }
                }
            }
        }
    }
}

#[component]
fn NotesField(value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "form-field form-field-wide",
            label { r#for: "notes", "Notater" }
            textarea {
                id: "notes",
                class: "input",
                rows: 2,
                value: "{value}",
                oninput: move |evt: FormEvent| on_change.call(evt.value()),
            }
        }
    }
}

/// Product lines with live line totals and the grand total.
#[component]
fn LineEditor(
    draft: Signal<LineItemsDraft>,
    products: Vec<Product>,
    price_label: &'static str,
) -> Element {
    let mut draft = draft;
    let current = draft();
    let total = current.total();
    let single = current.lines.len() == 1;

    rsx! {
        div {
            class: "line-items",
            div {
                class: "line-item view-muted",
                span { "Produkt" }
                span { "Antall" }
                span { "{price_label}" }
                span { class: "line-total", "Sum" }
                span {}
            }
            for (index, line) in current.lines.iter().enumerate() {
                div {
                    key: "{index}",
                    class: "line-item",
                    select {
                        class: "input",
                        "aria-label": "Produkt",
                        value: "{line.product_id}",
                        onchange: {
                            let products = products.clone();
                            move |evt: FormEvent| draft.write().set_product(index, &evt.value(), &products)
                        },
                        option { value: "", "Velg produkt..." }
                        for p in products.iter() {
                            option {
                                key: "{p.id}",
                                value: "{p.id}",
                                selected: line.product_id == p.id,
                                "{p.name} ({p.sku})"
                            }
                        }
                    }
                    input {
                        class: "input",
                        r#type: "number",
                        min: "1",
                        "aria-label": "Antall",
                        value: "{line.quantity}",
                        oninput: move |evt: FormEvent| draft.write().set_quantity(index, &evt.value()),
                    }
                    input {
                        class: "input",
                        inputmode: "decimal",
                        "aria-label": "{price_label}",
                        value: "{line.price}",
                        oninput: move |evt: FormEvent| draft.write().set_price(index, &evt.value()),
                    }
                    span { class: "line-total", "{kr(current.line_total(index))}" }
                    button {
                        class: "btn btn-small btn-danger-outline",
                        r#type: "button",
                        disabled: single,
                        title: "Fjern linje",
                        onclick: move |_| draft.write().remove_line(index),
                        "\u{00D7}"
                    }
                }
            }
            button {
                class: "btn btn-outline",
                r#type: "button",
                onclick: move |_| draft.write().add_line(),
                "+ Legg til produkt"
            }
            div { class: "order-total", "Totalt: {kr(total)}" }
        }
    }
}
