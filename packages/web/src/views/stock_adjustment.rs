use api::{short_date, AdjustmentForm, Notice, StockAdjustment as AdjustmentRecord, StockItem};
use dioxus::prelude::*;
use ui::views::{EmptyState, ErrorBanner, LoadingState};
use ui::{log_activity, use_activity_log, use_auth, LogLevel};

use super::report_failure;
use crate::Route;

#[derive(Clone, PartialEq)]
struct AdjustmentData {
    stock: Vec<StockItem>,
    history: Vec<AdjustmentRecord>,
    error: Option<String>,
}

/// Manual corrections for counting errors, shrinkage or damage. Stock levels
/// and history are fetched together and again after every saved correction.
#[component]
pub fn StockAdjustment() -> Element {
    let auth = use_auth();
    let mut log = use_activity_log();
    let mut form = use_signal(AdjustmentForm::default);
    let mut refresh = use_signal(|| 0u32);

    let data = use_resource(move || {
        refresh();
        async move {
            let store = auth.store();
            let token = store.token();
            match store.client().load_adjustments(token.as_deref()).await {
                Ok((stock, history)) => AdjustmentData {
                    stock,
                    history,
                    error: None,
                },
                Err(err) => AdjustmentData {
                    stock: Vec::new(),
                    history: Vec::new(),
                    error: Some(report_failure(auth, log, &err, "Kunne ikke laste lager")),
                },
            }
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(draft) = form.write().begin_submit() else {
            return;
        };
        spawn(async move {
            let store = auth.store();
            let token = store.token();
            let result = store.client().adjust_stock(token.as_deref(), &draft).await;
            match &result {
                Ok(done) => log_activity(&mut log, LogLevel::Success, &done.message),
                Err(err) => {
                    report_failure(auth, log, err, "Feil ved lagerjustering");
                }
            }
            let saved = form
                .try_write()
                .map(|mut form| form.finish_submit(result))
                .unwrap_or(false);
            if saved {
                refresh += 1;
            }
        });
    };

    let Some(data) = data.read().clone() else {
        return rsx! {
            LoadingState {}
        };
    };
    let current = form.read().clone();
    let submitting = current.is_submitting();
    let selected = data
        .stock
        .iter()
        .find(|s| s.product_id == current.draft.product_id)
        .cloned();
    let preview = selected
        .as_ref()
        .filter(|_| current.draft.change() != 0)
        .map(|item| current.draft.preview(item));
    let notice = current.notice().cloned();

    rsx! {
        div {
            class: "view-page max-w-3xl",
            div {
                class: "view-header",
                div {
                    h1 { class: "view-title", "Lagerjustering" }
                    p { class: "view-muted", "Juster lagerbeholdning manuelt for korrigeringer, svinn eller skade" }
                }
                Link { class: "btn btn-outline", to: Route::Stock {}, "← Tilbake" }
            }

            if let Some(message) = data.error.clone() {
                ErrorBanner { message }
            }

            {match notice {
                Some(Notice::Success(text)) => rsx! {
                    div { class: "notice-success", role: "status", "{text}" }
                },
                Some(Notice::Error(text)) => rsx! {
                    ErrorBanner { message: text, on_dismiss: move |_| form.write().dismiss_notice() }
                },
                None => rsx! {},
            }}

            form {
                class: "card form-grid",
                onsubmit: submit,
                h2 { class: "view-section-title", "Ny justering" }

                div {
                    class: "field",
                    label { r#for: "adjust-product", "Produkt *" }
                    select {
                        id: "adjust-product",
                        class: "input",
                        onchange: move |evt: FormEvent| form.write().draft.product_id = evt.value(),
                        option { value: "", "Velg produkt..." }
                        for item in data.stock.iter() {
                            option {
                                key: "{item.product_id}",
                                value: "{item.product_id}",
                                selected: item.product_id == current.draft.product_id,
                                "{item.product_name} (nå: {item.quantity} stk)"
                            }
                        }
                    }
                }

                if let Some(item) = selected.as_ref() {
                    div {
                        class: "detail-grid",
                        span { "Lagerbeholdning: {item.quantity} stk" }
                        span { "Minimum: {item.min_stock} stk" }
                        span { "Status: {item.status}" }
                    }
                }

                div {
                    class: "field",
                    label { r#for: "adjust-change", "Endring (antall) *" }
                    div {
                        class: "flex gap-3",
                        button {
                            class: "btn btn-outline btn-small",
                            r#type: "button",
                            onclick: move |_| form.write().draft.step(-1),
                            "-"
                        }
                        input {
                            id: "adjust-change",
                            class: "input",
                            r#type: "number",
                            value: "{current.draft.change}",
                            oninput: move |evt: FormEvent| form.write().draft.change = evt.value(),
                        }
                        button {
                            class: "btn btn-outline btn-small",
                            r#type: "button",
                            onclick: move |_| form.write().draft.step(1),
                            "+"
                        }
                    }
                    small { class: "view-muted", "Positivt tall øker, negativt reduserer" }
                }

                if let Some(after) = preview {
                    div {
                        class: "order-total",
                        "Nytt lagernivå: {after} stk"
                        if after < 0 {
                            span { class: "form-error", " Kan ikke gå under 0" }
                        }
                    }
                }

                div {
                    class: "field",
                    label { r#for: "adjust-reason", "Årsak *" }
                    textarea {
                        id: "adjust-reason",
                        class: "input",
                        rows: "3",
                        placeholder: "F.eks. fysisk telling, skade, svinn",
                        value: "{current.draft.reason}",
                        oninput: move |evt: FormEvent| form.write().draft.reason = evt.value(),
                    }
                }

                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Justerer..." } else { "Juster lager" }
                    }
                }
            }

            section {
                class: "card",
                h2 { class: "view-section-title", "Siste justeringer" }
                if data.history.is_empty() {
                    EmptyState { message: "Ingen justeringer ennå".to_string() }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Dato" }
                                th { "Produkt" }
                                th { "Endring" }
                                th { "Årsak" }
                                th { "Utført av" }
                            }
                        }
                        tbody {
                            for adj in data.history.iter() {
                                tr {
                                    key: "{adj.id}",
                                    td { "{short_date(&adj.created_at)}" }
                                    td { "{adj.product_name}" }
                                    td {
                                        class: if adj.change >= 0 { "badge-in" } else { "badge-out" },
                                        "{adj.signed_change()}"
                                    }
                                    td { "{adj.reason}" }
                                    td { {adj.created_by.clone().unwrap_or_else(|| "Ukjent".to_string())} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
