use api::Customer;
use dioxus::prelude::*;
use ui::{use_resource_page, ResourceView};

use crate::Route;

/// Customer list with the status filter; names link to the detail page.
#[component]
pub fn Customers() -> Element {
    let handle = use_resource_page::<Customer>();
    let nav = use_navigator();

    rsx! {
        ResourceView::<Customer> {
            handle,
            on_open: move |id: String| {
                nav.push(Route::CustomerDetail { id });
            },
        }
    }
}
