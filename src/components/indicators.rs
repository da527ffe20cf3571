use std::time::Duration;

use cv_agent_core::indicators::{
    attempts_badge, confidence_percentage, format_processing_time, tool_badge, ConfidenceLevel,
};
use dioxus::prelude::*;

#[component]
pub fn ConfidenceIndicator(confidence: f64, attempts: u32) -> Element {
    let level = ConfidenceLevel::from_score(confidence);
    let percentage = confidence_percentage(confidence);
    let label = level.label();
    let color = level.color();

    rsx! {
        div {
            class: "confidence-indicator",
            div {
                class: "confidence-header",
                span { class: "confidence-label", "📊 Confidence: {percentage}% ({label})" }
                if let Some(badge) = attempts_badge(attempts) {
                    span { class: "attempts-badge", "{badge}" }
                }
            }
            div {
                class: "confidence-bar",
                div {
                    class: "confidence-fill",
                    style: "width: {percentage}%; background-color: {color};",
                }
            }
        }
    }
}

#[component]
pub fn ProcessingTime(elapsed: Duration) -> Element {
    let text = format_processing_time(elapsed);
    rsx! {
        div { class: "processing-time", "{text}" }
    }
}

#[component]
pub fn ToolsUsed(tools: Vec<String>) -> Element {
    if tools.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "tools-used",
            h4 { "🔧 Tools used" }
            div {
                class: "tools-grid",
                for tool in tools.iter() {
                    {
                        let badge = tool_badge(tool);
                        rsx! {
                            div {
                                key: "{tool}",
                                class: "tool-badge",
                                title: "{tool}",
                                span { class: "tool-icon", "{badge.icon}" }
                                span { class: "tool-name", "{badge.label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
