use cv_agent_core::markdown;
use dioxus::prelude::*;

#[component]
pub fn FormattedResponse(text: String) -> Element {
    // Escaped by the renderer; only the fixed tag subset reaches the webview.
    let html = markdown::render(&text);
    rsx! {
        div {
            class: "response-text",
            dangerous_inner_html: "{html}",
        }
    }
}
