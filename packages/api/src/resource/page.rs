//! # Resource page state machine
//!
//! [`ResourcePage`] owns everything one list screen holds while it is mounted:
//! the fetched records, loading flags, the status filter, an open form and a
//! pending delete. It performs no I/O. The UI starts an operation
//! (`begin_load`, `begin_submit`, `confirm_delete`), runs the request and feeds
//! the outcome back (`finish_*`).
//!
//! ## Stale responses
//!
//! Every `begin_load` bumps a generation counter and hands out a
//! [`LoadTicket`]. `finish_load` ignores tickets from an older generation, and
//! [`ResourcePage::detach`] bumps the generation too, so a response that
//! arrives after the page was left (or after a newer load started) is dropped.
//!
//! Submits work the same way: each opened form gets a serial, `begin_submit`
//! hands out a [`SubmitTicket`] for it, and `finish_submit` only touches the
//! form the ticket belongs to. A successful write always asks for a re-fetch,
//! even if that form is no longer open.
//!
//! ## Writes
//!
//! The backend is the single source of truth. A successful create, update or
//! delete never patches `records` locally; it tells the caller to re-fetch.

use serde_json::Value;

use super::draft::FormDraft;
use super::schema::ResourceSchema;
use super::{Record, References};
use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: FormDraft,
    pub submitting: bool,
    pub error: Option<String>,
    serial: u64,
}

/// The request a submitted form turns into.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitRequest {
    Create(Value),
    Update { id: String, payload: Value },
}

#[derive(Debug, PartialEq)]
pub enum Lookup<'a, R> {
    Loading,
    Found(&'a R),
    NotFound,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourcePage<R: Record> {
    schema: &'static ResourceSchema,
    records: Vec<R>,
    references: References,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    filter: Option<String>,
    form: Option<FormState>,
    pending_delete: Option<String>,
    deleting: bool,
    generation: u64,
    form_serial: u64,
}

impl<R: Record> ResourcePage<R> {
    pub fn new() -> Self {
        Self::with_schema(R::KIND.schema())
    }

    pub fn with_schema(schema: &'static ResourceSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            references: References::default(),
            loaded: false,
            loading: false,
            error: None,
            filter: None,
            form: None,
            pending_delete: None,
            deleting: false,
            generation: 0,
            form_serial: 0,
        }
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn references(&self) -> &References {
        &self.references
    }

    /// True once the first fetch settled, successfully or not.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A settled, successful fetch that returned nothing.
    pub fn is_empty(&self) -> bool {
        self.loaded && self.error.is_none() && self.records.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Show the failure of an action outside the form, such as a status
    /// change. Records are left as they are.
    pub fn report_error(&mut self, err: &ApiError, fallback: &str) {
        self.error = Some(err.user_message(fallback));
    }

    // ---- loading ----

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the
    /// result was discarded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<(Vec<R>, References), ApiError>,
    ) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        match result {
            Ok((records, references)) => {
                self.records = records;
                self.references = references;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message("Kunne ikke laste data"));
            }
        }
        self.loaded = true;
        self.loading = false;
        true
    }

    /// The page is going away; any in-flight result must not be applied.
    pub fn detach(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    // ---- filtering ----

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// `None` or an empty string shows everything.
    pub fn set_filter(&mut self, status: Option<&str>) {
        self.filter = status.filter(|s| !s.is_empty()).map(str::to_string);
    }

    /// Records in backend order, narrowed by the status filter.
    pub fn visible(&self) -> Vec<&R> {
        self.records
            .iter()
            .filter(|r| match &self.filter {
                Some(status) => r.status() == Some(status.as_str()),
                None => true,
            })
            .collect()
    }

    pub fn count_with_status(&self, status: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.status() == Some(status))
            .count()
    }

    pub fn lookup(&self, id: &str) -> Lookup<'_, R> {
        if !self.loaded {
            return Lookup::Loading;
        }
        match self.records.iter().find(|r| r.id() == id) {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound,
        }
    }

    // ---- form ----

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.form.as_ref().is_some_and(|f| f.submitting)
    }

    fn next_serial(&mut self) -> u64 {
        self.form_serial += 1;
        self.form_serial
    }

    pub fn open_create(&mut self) {
        let serial = self.next_serial();
        self.form = Some(FormState {
            mode: FormMode::Create,
            draft: FormDraft::new(self.schema),
            submitting: false,
            error: None,
            serial,
        });
    }

    /// Open the edit form for a listed record. Returns `false` if the id is
    /// not in the current list.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.records.iter().find(|r| r.id() == id) else {
            return false;
        };
        let draft = FormDraft::from_record(self.schema, record);
        let serial = self.next_serial();
        self.form = Some(FormState {
            mode: FormMode::Edit(id.to_string()),
            draft,
            submitting: false,
            error: None,
            serial,
        });
        true
    }

    pub fn update_field(&mut self, key: &str, value: impl Into<String>) {
        if let Some(form) = self.form.as_mut() {
            form.draft.set(key, value);
        }
    }

    /// Ignored while the form's request is in flight.
    pub fn close_form(&mut self) {
        if !self.is_submitting() {
            self.form = None;
        }
    }

    /// Validate the open form and mark it in flight.
    ///
    /// Returns `None` without side effects when no form is open or a submit
    /// is already running, and `None` with the form's inline error set when
    /// validation fails. The draft is kept in both cases.
    pub fn begin_submit(&mut self) -> Option<(SubmitTicket, SubmitRequest)> {
        let schema = self.schema;
        let form = self.form.as_mut()?;
        if form.submitting {
            return None;
        }
        match form.draft.to_payload(schema) {
            Ok(payload) => {
                form.submitting = true;
                form.error = None;
                let request = match &form.mode {
                    FormMode::Create => SubmitRequest::Create(payload),
                    FormMode::Edit(id) => SubmitRequest::Update {
                        id: id.clone(),
                        payload,
                    },
                };
                Some((SubmitTicket(form.serial), request))
            }
            Err(err) => {
                form.error = Some(err.to_string());
                None
            }
        }
    }

    /// Apply a submit outcome. Returns `true` when the list must be re-fetched.
    ///
    /// Only the form the ticket was issued for is closed or given the error.
    /// A failure whose form is gone is shown as the page error instead.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, result: Result<(), ApiError>) -> bool {
        let own_form = self
            .form
            .as_mut()
            .filter(|form| form.serial == ticket.0);
        match result {
            Ok(()) => {
                if own_form.is_some() {
                    self.form = None;
                }
                true
            }
            Err(err) => {
                let message = err.user_message("Kunne ikke lagre. Prøv igjen.");
                match own_form {
                    Some(form) => {
                        form.submitting = false;
                        form.error = Some(message);
                    }
                    None => self.error = Some(message),
                }
                false
            }
        }
    }

    // ---- delete ----

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, id: &str) {
        if self.schema.deletable && !self.deleting {
            self.pending_delete = Some(id.to_string());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed; returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<String> {
        if self.deleting {
            return None;
        }
        let id = self.pending_delete.take()?;
        self.deleting = true;
        Some(id)
    }

    /// Apply a delete outcome. Returns `true` when the list must be re-fetched.
    /// On failure the list stays as it was and the error is shown.
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> bool {
        self.deleting = false;
        match result {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err.user_message("Kunne ikke slette. Prøv igjen."));
                false
            }
        }
    }
}

impl<R: Record> Default for ResourcePage<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Task};
    use crate::resource::ResourceKind;

    fn customer(id: &str, status: &str) -> Customer {
        Customer {
            id: id.into(),
            name: format!("Kunde {id}"),
            status: status.into(),
            ..Default::default()
        }
    }

    fn loaded(records: Vec<Customer>) -> ResourcePage<Customer> {
        let mut page = ResourcePage::new();
        let ticket = page.begin_load();
        assert!(page.finish_load(ticket, Ok((records, References::default()))));
        page
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        let mut page: ResourcePage<Customer> = ResourcePage::new();
        assert!(!page.is_empty());
        let ticket = page.begin_load();
        assert!(page.is_loading());

        page.finish_load(ticket, Ok((vec![], References::default())));
        assert!(page.is_empty());
        assert!(!page.is_loading());
        assert!(page.error().is_none());
    }

    #[test]
    fn test_stale_load_discarded() {
        let mut page: ResourcePage<Customer> = ResourcePage::new();
        let first = page.begin_load();
        let second = page.begin_load();

        assert!(page.finish_load(second, Ok((vec![customer("new", "VIP")], References::default()))));
        assert!(!page.finish_load(first, Ok((vec![customer("old", "Lead")], References::default()))));
        assert_eq!(page.records()[0].id, "new");
    }

    #[test]
    fn test_detach_discards_in_flight() {
        let mut page: ResourcePage<Customer> = ResourcePage::new();
        let ticket = page.begin_load();
        page.detach();
        assert!(!page.finish_load(ticket, Ok((vec![customer("a", "New")], References::default()))));
        assert!(page.records().is_empty());
        assert!(!page.is_loaded());
    }

    #[test]
    fn test_load_error_keeps_records() {
        let mut page = loaded(vec![customer("a", "New")]);
        let ticket = page.begin_load();
        page.finish_load(ticket, Err(ApiError::Server { status: 500, message: "Serverfeil (500)".into() }));
        assert_eq!(page.error(), Some("Serverfeil (500)"));
        assert_eq!(page.records().len(), 1);
        assert!(!page.is_empty());
    }

    #[test]
    fn test_status_filter_is_client_side() {
        let mut page = loaded(vec![
            customer("a", "VIP"),
            customer("b", "Lead"),
            customer("c", "VIP"),
        ]);
        page.set_filter(Some("VIP"));
        let ids: Vec<_> = page.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(page.count_with_status("Lead"), 1);

        page.set_filter(Some(""));
        assert_eq!(page.visible().len(), 3);
    }

    #[test]
    fn test_lookup_not_found() {
        let page: ResourcePage<Customer> = ResourcePage::new();
        assert_eq!(page.lookup("unknown-id"), Lookup::Loading);

        let page = loaded(vec![customer("a", "New")]);
        assert_eq!(page.lookup("unknown-id"), Lookup::NotFound);
        assert!(matches!(page.lookup("a"), Lookup::Found(c) if c.name == "Kunde a"));
        assert_eq!(page.schema().not_found, "Kunde ikke funnet");
    }

    #[test]
    fn test_submit_validation_keeps_draft() {
        let mut page: ResourcePage<Task> = ResourcePage::new();
        page.open_create();
        page.update_field("priority", "High");

        assert_eq!(page.begin_submit(), None);
        let form = page.form().unwrap();
        assert_eq!(form.error.as_deref(), Some("Tittel må fylles ut"));
        assert_eq!(form.draft.get("priority"), "High");
        assert!(!form.submitting);
    }

    #[test]
    fn test_submit_blocks_double_submission() {
        let mut page: ResourcePage<Task> = ResourcePage::new();
        page.open_create();
        page.update_field("title", "Bestill etiketter");

        let request = page.begin_submit();
        assert!(matches!(request, Some((_, SubmitRequest::Create(ref p))) if p["title"] == "Bestill etiketter"));
        assert!(page.is_submitting());
        assert_eq!(page.begin_submit(), None);
    }

    #[test]
    fn test_submit_failure_then_success() {
        let mut page: ResourcePage<Task> = ResourcePage::new();
        page.open_create();
        page.update_field("title", "Ring");
        let (ticket, _) = page.begin_submit().unwrap();

        let reload = page.finish_submit(ticket, Err(ApiError::Validation("title: too short".into())));
        assert!(!reload);
        let form = page.form().unwrap();
        assert_eq!(form.error.as_deref(), Some("title: too short"));
        assert_eq!(form.draft.get("title"), "Ring");
        assert!(!form.submitting);

        page.update_field("title", "Ring kunden");
        let (ticket, _) = page.begin_submit().unwrap();
        assert!(page.finish_submit(ticket, Ok(())));
        assert!(page.form().is_none());
    }

    #[test]
    fn test_cancel_ignored_while_submitting() {
        let mut page: ResourcePage<Task> = ResourcePage::new();
        page.open_create();
        page.update_field("title", "Ring kunden");
        let (ticket, _) = page.begin_submit().unwrap();

        page.close_form();
        assert!(page.is_submitting());
        assert!(page.finish_submit(ticket, Ok(())));
        assert!(page.form().is_none());
    }

    #[test]
    fn test_saved_form_refetches_after_replacement() {
        let mut page: ResourcePage<Task> = ResourcePage::new();
        page.open_create();
        page.update_field("title", "Ring kunden");
        let (first, _) = page.begin_submit().unwrap();

        page.open_create();
        page.update_field("title", "Second draft");
        assert!(page.finish_submit(first, Ok(())));

        let form = page.form().unwrap();
        assert_eq!(form.draft.get("title"), "Second draft");
        assert!(!form.submitting);
        assert_eq!(form.error, None);
    }

    #[test]
    fn test_failed_submit_does_not_touch_newer_form() {
        let mut page: ResourcePage<Task> = ResourcePage::new();
        page.open_create();
        page.update_field("title", "Ring kunden");
        let (first, _) = page.begin_submit().unwrap();

        page.open_create();
        page.update_field("title", "Second draft");
        assert!(!page.finish_submit(first, Err(ApiError::Validation("title: duplicate".into()))));

        let form = page.form().unwrap();
        assert_eq!(form.error, None);
        assert_eq!(form.draft.get("title"), "Second draft");
        assert_eq!(page.error(), Some("title: duplicate"));
    }

    #[test]
    fn test_edit_produces_update() {
        let mut page = loaded(vec![customer("c1", "Active")]);
        assert!(!page.open_edit("missing"));
        assert!(page.open_edit("c1"));
        page.update_field("city", "Bergen");

        match page.begin_submit() {
            Some((_, SubmitRequest::Update { id, payload })) => {
                assert_eq!(id, "c1");
                assert_eq!(payload["city"], "Bergen");
                assert_eq!(payload["status"], "Active");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut page = loaded(vec![customer("c1", "New")]);
        assert_eq!(page.confirm_delete(), None);

        page.request_delete("c1");
        assert_eq!(page.pending_delete(), Some("c1"));
        page.cancel_delete();
        assert_eq!(page.confirm_delete(), None);

        page.request_delete("c1");
        assert_eq!(page.confirm_delete().as_deref(), Some("c1"));
        assert!(page.is_deleting());

        assert!(!page.finish_delete(Err(ApiError::NotFound("Fant ikke ressursen".into()))));
        assert_eq!(page.error(), Some("Fant ikke ressursen"));
        assert_eq!(page.records().len(), 1);
    }

    #[test]
    fn test_read_only_schema_cannot_delete() {
        let mut page: ResourcePage<crate::models::StockItem> = ResourcePage::new();
        assert_eq!(page.schema().kind, ResourceKind::Stock);
        page.request_delete("s1");
        assert_eq!(page.pending_delete(), None);
    }

    #[test]
    fn test_action_error_keeps_records() {
        let mut page = loaded(vec![customer("c1", "New")]);
        page.report_error(&ApiError::Network("timeout".into()), "Kunne ikke oppdatere status");
        assert_eq!(page.error(), Some("Kunne ikke oppdatere status"));
        assert_eq!(page.records().len(), 1);
        page.dismiss_error();
        assert_eq!(page.error(), None);
    }
}
