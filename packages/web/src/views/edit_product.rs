//! Full-page product editor with image upload.

use api::{ImageUpload, Lookup, Product, IMAGE_ACCEPT};
use dioxus::prelude::*;
use ui::views::LoadingState;
use ui::{log_activity, use_activity_log, use_auth, use_resource_page, DraftFields, LogLevel};

use super::report_failure;
use crate::Route;

#[component]
pub fn EditProduct(id: String) -> Element {
    let auth = use_auth();
    let mut log = use_activity_log();
    let nav = use_navigator();
    let handle = use_resource_page::<Product>();
    let mut page = handle.page;
    let mut opened = use_signal(|| false);
    let mut uploading = use_signal(|| false);
    let mut upload_error = use_signal(|| Option::<String>::None);

    // Open the form once the product is in the fetched list.
    let target = id.clone();
    use_effect(move || {
        if opened() {
            return;
        }
        let found = matches!(page.read().lookup(&target), Lookup::Found(_));
        if found {
            page.write().open_edit(&target);
            opened.set(true);
        }
    });

    let state = page.read();
    let schema = state.schema();
    match state.lookup(&id) {
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
        Lookup::Found(_) => {}
    }
    let Some(form) = state.form().cloned() else {
        return rsx! {
            LoadingState {}
        };
    };
    let references = state.references().clone();
    drop(state);

    let image_url = form.draft.get("image_url").to_string();
    let preview = (!image_url.is_empty()).then(|| auth.asset_url(&image_url));

    let on_file = move |evt: FormEvent| async move {
        let Some(files) = evt.files() else {
            return;
        };
        let Some(file_name) = files.files().into_iter().next() else {
            return;
        };
        let Some(bytes) = files.read_file(&file_name).await else {
            upload_error.set(Some("Kunne ikke lese filen".to_string()));
            return;
        };
        upload_error.set(None);
        uploading.set(true);
        let store = auth.store();
        let token = store.token();
        let upload = ImageUpload {
            file_name,
            mime: None,
            bytes,
        };
        match store.client().upload_image(token.as_deref(), upload).await {
            Ok(url) => {
                page.write().update_field("image_url", url);
                log_activity(&mut log, LogLevel::Success, "Bilde lastet opp");
            }
            Err(err) => {
                upload_error.set(Some(report_failure(
                    auth,
                    log,
                    &err,
                    "Kunne ikke laste opp bilde",
                )));
            }
        }
        uploading.set(false);
    };

    let detail_id = id.clone();
    let cancel_id = id.clone();

    rsx! {
        div {
            class: "view-page max-w-3xl",
            div {
                class: "view-header",
                h1 { class: "view-title", "Rediger produkt" }
                Link { class: "btn btn-outline", to: Route::ProductDetail { id: id.clone() }, "← Tilbake" }
            }

            form {
                class: "card modal-body",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let id = detail_id.clone();
                    handle.submit(move || {
                        nav.push(Route::ProductDetail { id });
                    });
                },

                if let Some(err) = form.error.clone() {
                    div { class: "form-error", role: "alert", "{err}" }
                }

                DraftFields {
                    schema,
                    draft: form.draft.clone(),
                    references,
                    on_input: move |(key, value): (String, String)| page.write().update_field(&key, value),
                }

                div {
                    class: "form-field",
                    label { r#for: "image-upload", "Last opp bilde (JPEG, PNG eller WebP, maks 5MB)" }
                    input {
                        id: "image-upload",
                        r#type: "file",
                        accept: IMAGE_ACCEPT,
                        disabled: uploading(),
                        onchange: on_file,
                    }
                    if uploading() {
                        span { class: "view-muted", "Laster opp..." }
                    }
                    if let Some(err) = upload_error() {
                        div { class: "form-error", role: "alert", "{err}" }
                    }
                    if let Some(src) = preview {
                        img { class: "detail-image", src: "{src}", alt: "Produktbilde" }
                    }
                }

                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        disabled: form.submitting,
                        onclick: move |_| {
                            page.write().close_form();
                            nav.push(Route::ProductDetail { id: cancel_id.clone() });
                        },
                        "Avbryt"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: form.submitting || uploading(),
                        if form.submitting { "Lagrer..." } else { "Lagre endringer" }
                    }
                }
            }
        }
    }
}
