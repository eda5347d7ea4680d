use dioxus::prelude::*;

/// Page-level error with an optional dismiss button.
#[component]
pub fn ErrorBanner(message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            span { "{message}" }
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "error-banner-close",
                    title: "Lukk",
                    onclick: move |_| on_dismiss.call(()),
                    "\u{00D7}"
                }
            }
        }
    }
}

/// Shown instead of a table when a settled fetch returned nothing.
#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}

#[component]
pub fn LoadingState() -> Element {
    rsx! {
        div { class: "loading-state", "Laster..." }
    }
}
