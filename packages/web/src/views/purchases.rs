use api::{Purchase, Record};
use dioxus::prelude::*;
use ui::{use_resource_page, ResourceView};

use crate::Route;

/// Purchase list. An ordered purchase can be marked received, which the
/// backend books into stock.
#[component]
pub fn Purchases() -> Element {
    let handle = use_resource_page::<Purchase>();
    let page = handle.page;

    rsx! {
        ResourceView::<Purchase> {
            handle,
            header_actions: rsx! {
                Link { class: "btn btn-primary", to: Route::NewPurchase {}, "+ Nytt innkjøp" }
            },
            row_actions: move |id: String| {
                let receivable = page
                    .read()
                    .records()
                    .iter()
                    .any(|p| p.id() == id && p.can_receive());
                rsx! {
                    if receivable {
                        button {
                            class: "btn btn-small btn-success",
                            onclick: move |_| {
                                let id = id.clone();
                                handle.run_action(
                                    "Innkjøp mottatt og lagt til lager".to_string(),
                                    "Kunne ikke motta innkjøp",
                                    move |store| async move {
                                        let token = store.token();
                                        store.client().receive_purchase(token.as_deref(), &id).await
                                    },
                                );
                            },
                            "Motta"
                        }
                    }
                }
            },
        }
    }
}
