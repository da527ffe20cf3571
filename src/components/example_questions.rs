use cv_agent_core::indicators::{category_icon, category_label};
use cv_agent_core::Conversation;
use dioxus::prelude::*;

#[component]
pub fn ExampleQuestions() -> Element {
    let mut conversation = use_context::<Signal<Conversation>>();
    let state = conversation.read();
    if state.examples.is_empty() {
        return rsx! {};
    }
    let selected = state.selected_category.clone();
    let asking = state.asking;

    rsx! {
        div {
            class: "question-categories",
            h3 { "💡 Questions by category" }
            div {
                class: "category-tabs",
                for name in state.examples.names() {
                    {
                        let active_class = if name == selected { "active" } else { "" };
                        let name_for_click = name.to_string();
                        let label = format!("{} {}", category_icon(name), category_label(name)).trim_start().to_string();
                        rsx! {
                            button {
                                key: "{name}",
                                class: "category-tab {active_class}",
                                onclick: move |_| conversation.write().select_category(&name_for_click),
                                "{label}"
                            }
                        }
                    }
                }
            }
            div {
                class: "example-questions",
                for (i, question) in state.selected_examples().iter().enumerate() {
                    {
                        let question_for_click = question.clone();
                        rsx! {
                            button {
                                key: "{i}",
                                class: "example-question",
                                disabled: asking,
                                onclick: move |_| conversation.write().use_example(&question_for_click),
                                "{question}"
                            }
                        }
                    }
                }
            }
        }
    }
}
