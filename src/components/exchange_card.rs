use std::time::Duration;

use cv_agent_core::models::ConversationEntry;
use cv_agent_core::workflow::format_path;
use dioxus::prelude::*;
use dioxus_free_icons::{icons::fi_icons, Icon};
use feature_clipboard::copy_to_clipboard;
use tokio::time::sleep;

use crate::components::formatted_response::FormattedResponse;
use crate::components::indicators::{ConfidenceIndicator, ProcessingTime, ToolsUsed};
use crate::components::workflow_view::WorkflowView;

/// One question and its answer, with the metadata the agent returned.
#[component]
pub fn ExchangeCard(entry: ConversationEntry, show_details: bool) -> Element {
    let mut copied = use_signal(|| false);

    let answer_for_copy = entry.answer.clone();
    let copy_onclick = move |_| {
        let answer = answer_for_copy.clone();
        spawn(async move {
            if copy_to_clipboard(&answer).is_ok() {
                copied.set(true);
                sleep(Duration::from_secs(2)).await;
                copied.set(false);
            }
        });
    };

    let time = entry.display_time();
    let confidence_text = format!("{:.1}%", entry.confidence * 100.0);
    let path_text = format_path(&entry.workflow_path);
    let tools_text = entry.tools_used.join(", ");

    rsx! {
        div {
            class: "chat-item",
            div {
                class: "question-section",
                div {
                    class: "question-header",
                    h4 { "❓ Question" }
                    div {
                        class: "question-meta",
                        ProcessingTime { elapsed: entry.processing_time }
                        span { class: "timestamp", "{time}" }
                    }
                }
                div { class: "question-text", "{entry.question}" }
            }
            div {
                class: "response-section",
                div {
                    class: "response-header",
                    h4 { "🤖 Agent answer" }
                    ConfidenceIndicator { confidence: entry.confidence, attempts: entry.attempts }
                    button {
                        class: "copy-button",
                        title: "Copy answer",
                        onclick: copy_onclick,
                        if *copied.read() {
                            Icon { width: 14, height: 14, icon: fi_icons::FiCheck }
                        } else {
                            Icon { width: 14, height: 14, icon: fi_icons::FiClipboard }
                        }
                    }
                }
                FormattedResponse { text: entry.answer.clone() }
                WorkflowView { path: entry.workflow_path.clone(), question_type: entry.question_type.clone() }
                ToolsUsed { tools: entry.tools_used.clone() }
                if show_details {
                    details {
                        class: "technical-details",
                        summary { "🔍 Technical details" }
                        div {
                            class: "details-content",
                            DetailItem { name: "Question type", value: entry.question_type.clone() }
                            DetailItem { name: "Workflow path", value: path_text }
                            DetailItem { name: "Tools", value: tools_text }
                            DetailItem { name: "Attempts", value: entry.attempts.to_string() }
                            DetailItem { name: "Confidence score", value: confidence_text }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DetailItem(name: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "detail-item",
            strong { "{name}: " }
            "{value}"
        }
    }
}
