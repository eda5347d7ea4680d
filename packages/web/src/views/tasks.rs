use api::resource::schema::TASK_STATUSES;
use api::{Record, Task};
use dioxus::prelude::*;
use ui::{today, use_resource_page, ResourceView};

#[component]
pub fn Tasks() -> Element {
    let handle = use_resource_page::<Task>();
    let page = handle.page;
    let today = use_hook(today);

    let overdue = page
        .read()
        .records()
        .iter()
        .filter(|t| t.is_overdue(&today))
        .count();

    rsx! {
        ResourceView::<Task> {
            handle,
            summary: rsx! {
                if overdue > 0 {
                    div { class: "form-error", "{overdue} oppgave(r) har passert fristen" }
                }
            },
            row_class: move |id: String| {
                let state = page.read();
                match state.records().iter().find(|t| t.id() == id) {
                    Some(task) if task.is_done() => "done".to_string(),
                    Some(task) if task.is_overdue(&today) => "overdue".to_string(),
                    _ => String::new(),
                }
            },
            row_actions: move |id: String| {
                let (current, done) = page
                    .read()
                    .records()
                    .iter()
                    .find(|t| t.id() == id)
                    .map(|t| (t.status.clone(), t.is_done()))
                    .unwrap_or_default();
                let finish_id = id.clone();
                rsx! {
                    select {
                        class: "input",
                        "aria-label": "Status",
                        value: "{current}",
                        onchange: move |evt: FormEvent| handle.set_status(id.clone(), evt.value()),
                        for (value, label) in TASK_STATUSES.iter() {
                            option {
                                key: "{value}",
                                value: "{value}",
                                selected: current == *value,
                                "{label}"
                            }
                        }
                    }
                    if !done {
                        button {
                            class: "btn btn-small btn-success",
                            onclick: move |_| handle.set_status(finish_id.clone(), "Done".to_string()),
                            "Fullfør"
                        }
                    }
                }
            },
        }
    }
}
