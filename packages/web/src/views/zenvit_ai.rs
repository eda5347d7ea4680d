//! Internal product advisor: describe a customer, get product suggestions.

use api::{ApiError, Recommendations, MIN_AI_CONTEXT_CHARS};
use dioxus::prelude::*;
use ui::{use_activity_log, use_auth, Markdown};

use super::report_failure;

const EXAMPLE_PROMPTS: [&str; 4] = [
    "Kunde med lite energi og dårlig søvn",
    "Kunde som er ofte syk og har dårlig hud",
    "Kunde som ikke spiser fisk og fryser mye om vinteren",
    "Eldre kunde med leddsmerter og stivhet",
];

#[component]
pub fn ZenVitAi() -> Element {
    let auth = use_auth();
    let log = use_activity_log();
    let mut context = use_signal(String::new);
    let mut result = use_signal(|| Option::<Recommendations>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let ask = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        let text = context();
        if text.trim().chars().count() < MIN_AI_CONTEXT_CHARS {
            error.set(Some(format!(
                "Vennligst gi en mer detaljert beskrivelse av kunden (minst {MIN_AI_CONTEXT_CHARS} tegn)"
            )));
            return;
        }
        error.set(None);
        result.set(None);
        loading.set(true);
        spawn(async move {
            let store = auth.store();
            let token = store.token();
            match store.client().recommend_products(token.as_deref(), &text).await {
                Ok(rec) if rec.success => result.set(Some(rec)),
                Ok(_) => error.set(Some("Kunne ikke generere anbefalinger. Prøv igjen.".to_string())),
                Err(err @ ApiError::InvalidInput(_)) => error.set(Some(err.to_string())),
                Err(err) => error.set(Some(report_failure(
                    auth,
                    log,
                    &err,
                    "Kunne ikke generere anbefalinger. Prøv igjen.",
                ))),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                div {
                    h1 { class: "view-title", "ZenVit AI-veileder" }
                    p { class: "view-muted", "Produktanbefaling basert på kundebehov (intern bruk)" }
                }
                span { class: "badge", "Beta" }
            }

            div {
                class: "detail-grid",
                form {
                    class: "card modal-body",
                    onsubmit: ask,
                    h2 { class: "view-section-title", "Beskriv kunden / behovet" }
                    textarea {
                        class: "input",
                        rows: 6,
                        placeholder: "Eksempel: Kunde som er ofte syk og fryser mye om vinteren...",
                        value: "{context}",
                        disabled: loading(),
                        oninput: move |evt: FormEvent| context.set(evt.value()),
                    }
                    div {
                        class: "modal-actions",
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            disabled: loading(),
                            onclick: move |_| {
                                context.set(String::new());
                                result.set(None);
                                error.set(None);
                            },
                            "Tøm"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: loading(),
                            if loading() { "Analyserer..." } else { "Få anbefalinger" }
                        }
                    }
                    p { class: "view-muted", "Eksempler (klikk for å bruke):" }
                    div {
                        class: "prompt-chips",
                        for prompt in EXAMPLE_PROMPTS {
                            button {
                                key: "{prompt}",
                                class: "filter-chip",
                                r#type: "button",
                                disabled: loading(),
                                onclick: move |_| {
                                    context.set(prompt.to_string());
                                    result.set(None);
                                    error.set(None);
                                },
                                "{prompt}"
                            }
                        }
                    }
                    p {
                        class: "view-muted",
                        "AI-anbefalinger er generelle råd, ikke medisinske diagnoser. Ved alvorlige symptomer skal kunden rådføre seg med lege."
                    }
                }

                div {
                    if let Some(message) = error() {
                        div {
                            class: "error-banner",
                            role: "alert",
                            "{message}"
                        }
                    }
                    if let Some(rec) = result() {
                        section {
                            class: "card",
                            h2 { class: "view-section-title", "Anbefalte produkter" }
                            for (i, product) in rec.recommendations.products.iter().enumerate() {
                                div {
                                    key: "{i}",
                                    class: "card recommendation",
                                    strong { "{product.name}" }
                                    p { "{product.reason}" }
                                    if let Some(dose) = product.dose.clone() {
                                        p { class: "view-muted", "Dosering: {dose}" }
                                    }
                                }
                            }
                        }
                        section {
                            class: "card",
                            h2 { class: "view-section-title", "Detaljert begrunnelse" }
                            Markdown { source: rec.recommendations.explanation.clone() }
                        }
                    } else if error().is_none() && !loading() {
                        section {
                            class: "card",
                            h2 { class: "view-section-title", "Klar til å hjelpe!" }
                            p {
                                class: "view-muted",
                                "Beskriv kundens behov i tekstfeltet, så foreslår AI-en de beste ZenVit-produktene."
                            }
                        }
                    }
                }
            }
        }
    }
}
