use cv_agent_core::workflow::{stage_statuses, STAGES};
use dioxus::prelude::*;

#[component]
pub fn WorkflowView(path: Vec<String>, question_type: String) -> Element {
    let statuses = stage_statuses(&path);
    let last_index = STAGES.len() - 1;

    rsx! {
        div {
            class: "workflow-visualization",
            div {
                class: "workflow-header",
                h3 { "🔄 Agent workflow" }
                div {
                    class: "question-type-badge",
                    "Type: "
                    span { class: "type-label", "{question_type}" }
                }
            }
            div {
                class: "workflow-nodes",
                for (index, (stage, status)) in statuses.into_iter().enumerate() {
                    {
                        let mut classes = vec!["workflow-node"];
                        if status.active { classes.push("active"); }
                        if status.completed { classes.push("completed"); }
                        if status.current { classes.push("current"); }
                        let node_class = classes.join(" ");
                        let arrow_class = if status.active { "node-arrow active" } else { "node-arrow" };
                        rsx! {
                            div {
                                key: "{stage.id}",
                                class: "{node_class}",
                                div {
                                    class: "node-header",
                                    span { class: "node-label", "{stage.label}" }
                                    if status.completed {
                                        span { class: "completion-check", "✓" }
                                    }
                                    if status.current {
                                        span { class: "current-indicator", "→" }
                                    }
                                }
                                div { class: "node-description", "{stage.description}" }
                                if index < last_index {
                                    div { class: "{arrow_class}", "↓" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
