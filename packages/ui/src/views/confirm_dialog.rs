use dioxus::prelude::*;

use super::ModalOverlay;

/// Yes/no confirmation for destructive actions. While `busy` the confirm
/// button is disabled so the action cannot be fired twice.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Slett".to_string())] confirm_label: String,
    #[props(default = false)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "{title}" }
                p { class: "view-muted", "{message}" }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| on_cancel.call(()),
                        "Avbryt"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Sletter..." } else { "{confirm_label}" }
                    }
                }
            }
        }
    }
}
