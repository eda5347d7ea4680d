use api::Supplier;
use dioxus::prelude::*;
use ui::{use_resource_page, ResourceView};

#[component]
pub fn Suppliers() -> Element {
    let handle = use_resource_page::<Supplier>();
    rsx! {
        ResourceView::<Supplier> { handle }
    }
}
