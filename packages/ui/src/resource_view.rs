//! Generic list screen for any [`Record`]: table, status filter, modal
//! create/edit form and delete confirmation, all driven by the record's
//! [`ResourceSchema`].
//!
//! [`use_resource_page`] owns the page state and runs its requests;
//! [`ResourceView`] renders it. Entity pages that need more (status selects,
//! detail links, row highlighting) pass callbacks instead of re-implementing
//! the list.

use std::future::Future;

use api::{
    ApiError, FieldKind, FieldSpec, FormDraft, FormMode, FormState, Record, References,
    ResourcePage, ResourceSchema, SubmitRequest,
};
use dioxus::prelude::*;

use crate::activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};
use crate::auth::{use_auth, AuthContext};
use crate::platform::AppSessionStore;
use crate::views::{ConfirmDialog, EmptyState, ErrorBanner, LoadingState, ModalOverlay};

/// Page state plus what is needed to run its requests. `Copy`, so it can be
/// moved into any number of event handlers.
pub struct ResourceHandle<R: Record> {
    pub page: Signal<ResourcePage<R>>,
    auth: AuthContext,
    log: Signal<ActivityLog>,
}

impl<R: Record> Clone for ResourceHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for ResourceHandle<R> {}

impl<R: Record> PartialEq for ResourceHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.page == other.page
    }
}

/// Create the page state and fetch it once on mount. In-flight results are
/// discarded when the component unmounts.
pub fn use_resource_page<R: Record>() -> ResourceHandle<R> {
    let auth = use_auth();
    let log = use_activity_log();
    let page = use_signal(ResourcePage::<R>::new);
    let handle = ResourceHandle { page, auth, log };

    use_effect(move || handle.reload());
    use_drop(move || {
        let mut page = page;
        if let Ok(mut page) = page.try_write() {
            page.detach();
        };
    });

    handle
}

impl<R: Record> ResourceHandle<R> {
    fn report(self, err: &ApiError, context: &str) {
        self.auth.check_unauthorized(err);
        let mut log = self.log;
        log_activity(&mut log, LogLevel::Error, &format!("{context}: {err}"));
    }

    fn note(self, message: &str) {
        let mut log = self.log;
        log_activity(&mut log, LogLevel::Success, message);
    }

    /// Fetch the records and every reference list concurrently.
    pub fn reload(self) {
        let mut page = self.page;
        let ticket = page.write().begin_load();
        let schema = page.peek().schema();
        spawn(async move {
            let store = self.auth.store();
            let token = store.token();
            let result = store.client().load_page::<R>(token.as_deref(), schema).await;
            if let Err(err) = &result {
                self.report(err, &format!("Kunne ikke laste {}", schema.title.to_lowercase()));
            }
            if let Ok(mut page) = page.try_write() {
                page.finish_load(ticket, result);
            }
        });
    }

    /// Validate and send the open form. `on_saved` runs after a successful
    /// write, once the re-fetch has been started.
    pub fn submit(self, on_saved: impl FnOnce() + 'static) {
        let mut page = self.page;
        let Some((ticket, request)) = page.write().begin_submit() else {
            return;
        };
        let schema = page.peek().schema();
        spawn(async move {
            let store = self.auth.store();
            let token = store.token();
            let client = store.client();
            let result = match &request {
                SubmitRequest::Create(payload) => client
                    .create(token.as_deref(), R::KIND, payload)
                    .await
                    .map(|_| ()),
                SubmitRequest::Update { id, payload } => client
                    .update(token.as_deref(), R::KIND, id, payload)
                    .await
                    .map(|_| ()),
            };
            match &result {
                Ok(()) => self.note(&format!("Lagret {}", schema.singular)),
                Err(err) => self.report(err, &format!("Kunne ikke lagre {}", schema.singular)),
            }
            let saved = page
                .try_write()
                .map(|mut page| page.finish_submit(ticket, result))
                .unwrap_or(false);
            if saved {
                self.reload();
                on_saved();
            }
        });
    }

    /// Delete the record the user just confirmed.
    pub fn confirm_delete(self) {
        let mut page = self.page;
        let Some(id) = page.write().confirm_delete() else {
            return;
        };
        let schema = page.peek().schema();
        spawn(async move {
            let store = self.auth.store();
            let token = store.token();
            let result = store.client().delete(token.as_deref(), R::KIND, &id).await;
            match &result {
                Ok(()) => self.note(&format!("Slettet {}", schema.singular)),
                Err(err) => self.report(err, &format!("Kunne ikke slette {}", schema.singular)),
            }
            let deleted = page
                .try_write()
                .map(|mut page| page.finish_delete(result))
                .unwrap_or(false);
            if deleted {
                self.reload();
            }
        });
    }

    /// Run a one-off request (status change, receive) and re-fetch on success.
    pub fn run_action<F>(
        self,
        success: String,
        failure: &'static str,
        action: impl FnOnce(AppSessionStore) -> F + 'static,
    ) where
        F: Future<Output = Result<(), ApiError>> + 'static,
    {
        spawn(async move {
            match action(self.auth.store()).await {
                Ok(()) => {
                    self.note(&success);
                    self.reload();
                }
                Err(err) => {
                    self.report(&err, failure);
                    let mut page = self.page;
                    if let Ok(mut page) = page.try_write() {
                        page.report_error(&err, failure);
                    };
                }
            }
        });
    }

    /// `PUT /{orders|tasks}/{id}/status?status=`.
    pub fn set_status(self, id: String, status: String) {
        let success = format!("Status endret til {status}");
        self.run_action(success, "Kunne ikke oppdatere status", move |store| async move {
            let token = store.token();
            store
                .client()
                .set_status(token.as_deref(), R::KIND, &id, &status)
                .await
        });
    }
}

/// One rendered table row.
#[derive(Clone, PartialEq)]
struct Row {
    id: String,
    title: String,
    cells: Vec<String>,
}

/// Table, filter, form and delete dialog for a resource page.
#[component]
pub fn ResourceView<R: Record>(
    handle: ResourceHandle<R>,
    /// Makes the first cell a link, e.g. to a detail page.
    on_open: Option<EventHandler<String>>,
    /// Extra controls at the end of each row, given the row id.
    row_actions: Option<Callback<String, Element>>,
    /// Extra CSS class for a row, given its id.
    row_class: Option<Callback<String, String>>,
    /// Replaces the default "new" button, e.g. with a link to a custom form.
    header_actions: Option<Element>,
    /// Rendered between the header and the table.
    summary: Option<Element>,
) -> Element {
    let mut page = handle.page;
    let state = page.read();
    let schema = state.schema();

    let rows: Vec<Row> = state
        .visible()
        .into_iter()
        .map(|r| Row {
            id: r.id().to_string(),
            title: r.title(),
            cells: r.cells(),
        })
        .collect();
    let total = state.records().len();
    let counts: Vec<(&'static str, &'static str, usize)> = schema
        .status_options
        .iter()
        .map(|(value, label)| (*value, *label, state.count_with_status(value)))
        .collect();
    let filter = state.filter().map(str::to_string);
    let error = state.error().map(str::to_string);
    let loaded = state.is_loaded();
    let empty = state.is_empty();
    let form = state.form().cloned();
    let references = state.references().clone();
    let pending = state.pending_delete().map(|id| {
        let title = state
            .records()
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r.title())
            .unwrap_or_else(|| id.to_string());
        (id.to_string(), title)
    });
    let deleting = state.is_deleting();
    drop(state);

    let show_actions = schema.editable || schema.deletable || row_actions.is_some();

    rsx! {
        div {
            class: "view-page",

            div {
                class: "view-header",
                h1 { class: "view-title", "{schema.title}" }
                div {
                    class: "view-header-actions",
                    if let Some(actions) = header_actions {
                        {actions}
                    } else if schema.creatable {
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| page.write().open_create(),
                            "+ Ny {schema.singular}"
                        }
                    }
                }
            }

            if let Some(message) = error.clone() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| page.write().dismiss_error(),
                }
            }

            {summary}

            if !counts.is_empty() && loaded {
                div {
                    class: "filter-bar",
                    button {
                        class: if filter.is_none() { "filter-chip active" } else { "filter-chip" },
                        onclick: move |_| page.write().set_filter(None),
                        "Alle ({total})"
                    }
                    for (value, label, count) in counts {
                        button {
                            key: "{value}",
                            class: if filter.as_deref() == Some(value) { "filter-chip active" } else { "filter-chip" },
                            onclick: move |_| page.write().set_filter(Some(value)),
                            "{label} ({count})"
                        }
                    }
                }
            }

            if !loaded {
                LoadingState {}
            } else if empty {
                EmptyState { message: schema.empty_message.to_string() }
            } else if rows.is_empty() && error.is_none() {
                EmptyState { message: "Ingen treff for valgt filter".to_string() }
            } else if !rows.is_empty() {
                div {
                    class: "table-wrap",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                for column in schema.columns.iter() {
                                    th { key: "{column}", "{column}" }
                                }
                                if show_actions {
                                    th { class: "actions-col", "" }
                                }
                            }
                        }
                        tbody {
                            for row in rows {
                                tr {
                                    key: "{row.id}",
                                    class: row_class.map(|c| c.call(row.id.clone())).unwrap_or_default(),
                                    for (i, cell) in row.cells.iter().enumerate() {
                                        if i == 0 && on_open.is_some() {
                                            td {
                                                a {
                                                    class: "row-link",
                                                    onclick: {
                                                        let id = row.id.clone();
                                                        move |_| {
                                                            if let Some(on_open) = on_open {
                                                                on_open.call(id.clone());
                                                            }
                                                        }
                                                    },
                                                    "{cell}"
                                                }
                                            }
                                        } else {
                                            td { "{cell}" }
                                        }
                                    }
                                    if show_actions {
                                        td {
                                            class: "row-actions",
                                            if let Some(extra) = row_actions {
                                                {extra.call(row.id.clone())}
                                            }
                                            if schema.editable {
                                                button {
                                                    class: "btn btn-small btn-outline",
                                                    onclick: {
                                                        let id = row.id.clone();
                                                        move |_| {
                                                            page.write().open_edit(&id);
                                                        }
                                                    },
                                                    "Rediger"
                                                }
                                            }
                                            if schema.deletable {
                                                button {
                                                    class: "btn btn-small btn-danger-outline",
                                                    title: "Slett {row.title}",
                                                    onclick: {
                                                        let id = row.id.clone();
                                                        move |_| page.write().request_delete(&id)
                                                    },
                                                    "Slett"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(form) = form {
            FormModal {
                schema,
                form,
                references,
                on_input: move |(key, value): (String, String)| page.write().update_field(&key, value),
                on_submit: move |_| handle.submit(|| {}),
                on_cancel: move |_| page.write().close_form(),
            }
        }

        if let Some((_, title)) = pending {
            ConfirmDialog {
                title: "Bekreft sletting",
                message: format!("Er du sikker på at du vil slette «{title}»?"),
                busy: deleting,
                on_confirm: move |_| handle.confirm_delete(),
                on_cancel: move |_| page.write().cancel_delete(),
            }
        }
    }
}

/// Modal create/edit form.
#[component]
pub fn FormModal(
    schema: &'static ResourceSchema,
    form: FormState,
    references: References,
    on_input: EventHandler<(String, String)>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let submitting = form.submitting;
    let heading = match form.mode {
        FormMode::Create => format!("Ny {}", schema.singular),
        FormMode::Edit(_) => format!("Rediger {}", schema.singular),
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| {
                if !submitting {
                    on_cancel.call(());
                }
            },
            wide: schema.fields.len() > 6,
            form {
                class: "modal-body",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                h2 { class: "modal-title", "{heading}" }

                if let Some(err) = form.error.clone() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                DraftFields {
                    schema,
                    draft: form.draft.clone(),
                    references,
                    on_input,
                }

                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        disabled: submitting,
                        onclick: move |_| on_cancel.call(()),
                        "Avbryt"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Lagrer..." } else { "Lagre" }
                    }
                }
            }
        }
    }
}

/// One input per schema field, bound to a [`FormDraft`].
#[component]
pub fn DraftFields(
    schema: &'static ResourceSchema,
    draft: FormDraft,
    references: References,
    on_input: EventHandler<(String, String)>,
) -> Element {
    rsx! {
        div {
            class: "form-grid",
            for field in schema.fields.iter() {
                FieldInput {
                    key: "{field.key}",
                    field: *field,
                    value: draft.get(field.key).to_string(),
                    references: references.clone(),
                    on_input,
                }
            }
        }
    }
}

#[component]
fn FieldInput(
    field: FieldSpec,
    value: String,
    references: References,
    on_input: EventHandler<(String, String)>,
) -> Element {
    let key = field.key;
    let id = format!("field-{key}");
    let set = move |evt: FormEvent| on_input.call((key.to_string(), evt.value()));

    let input = match field.kind {
        FieldKind::TextArea => rsx! {
            textarea {
                id: "{id}",
                class: "input",
                rows: 3,
                value: "{value}",
                oninput: set,
            }
        },
        FieldKind::Select(options) => rsx! {
            select {
                id: "{id}",
                class: "input",
                value: "{value}",
                onchange: set,
                if !field.required {
                    option { value: "", "Velg..." }
                }
                for (v, label) in options.iter() {
                    option { key: "{v}", value: "{v}", selected: value == *v, "{label}" }
                }
            }
        },
        FieldKind::Reference(kind) => rsx! {
            select {
                id: "{id}",
                class: "input",
                value: "{value}",
                onchange: set,
                option { value: "", if field.required { "Velg..." } else { "Ingen" } }
                for opt in references.options(kind).iter() {
                    option { key: "{opt.id}", value: "{opt.id}", selected: value == opt.id, "{opt.label}" }
                }
            }
        },
        FieldKind::Checkbox => rsx! {
            input {
                id: "{id}",
                r#type: "checkbox",
                checked: value == "true",
                onchange: move |evt: FormEvent| {
                    on_input.call((key.to_string(), evt.checked().to_string()));
                },
            }
        },
        kind => {
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Date => "date",
                FieldKind::Integer => "number",
                _ => "text",
            };
            let mode = if kind == FieldKind::Decimal { "decimal" } else { "text" };
            rsx! {
                input {
                    id: "{id}",
                    class: "input",
                    r#type: input_type,
                    inputmode: mode,
                    value: "{value}",
                    oninput: set,
                }
            }
        }
    };

    rsx! {
        div {
            class: if matches!(field.kind, FieldKind::TextArea) { "form-field form-field-wide" } else { "form-field" },
            label {
                r#for: "{id}",
                "{field.label}"
                if field.required {
                    span { class: "required", " *" }
                }
            }
            {input}
        }
    }
}
