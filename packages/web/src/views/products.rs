use api::Product;
use dioxus::prelude::*;
use ui::{use_resource_page, ResourceView};

use crate::Route;

#[component]
pub fn Products() -> Element {
    let handle = use_resource_page::<Product>();
    let nav = use_navigator();

    rsx! {
        ResourceView::<Product> {
            handle,
            on_open: move |id: String| {
                nav.push(Route::ProductDetail { id });
            },
        }
    }
}
