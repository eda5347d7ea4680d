//! Markdown rendering for free text returned by the backend.

use dioxus::prelude::*;
use pulldown_cmark::{html, Event, Options, Parser};

/// Render markdown to HTML. Raw HTML in the source is escaped, not passed
/// through.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[component]
pub fn Markdown(source: String, #[props(default)] class: String) -> Element {
    let rendered = to_html(&source);
    rsx! {
        div {
            class: "markdown {class}",
            dangerous_inner_html: "{rendered}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_lists_and_emphasis() {
        let html = to_html("**Omega-3** passer godt.\n\n- D3\n- Magnesium");
        assert!(html.contains("<strong>Omega-3</strong>"));
        assert!(html.contains("<li>D3</li>"));
    }

    #[test]
    fn test_escapes_raw_html() {
        let html = to_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
