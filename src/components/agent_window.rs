use cv_agent_core::conversation::timed_ask;
use cv_agent_core::models::{DocumentFile, GraphInfo};
use cv_agent_core::{AgentApi, AppConfig, Conversation, HttpAgentApi};
use dioxus::prelude::*;
use dioxus_free_icons::{icons::fi_icons, Icon};
use futures_util::future::try_join;
use futures_util::StreamExt;

use crate::components::example_questions::ExampleQuestions;
use crate::components::exchange_card::ExchangeCard;
use crate::components::graph_panel::GraphPanel;
use crate::components::upload_card::UploadCard;
use crate::notify;

#[derive(Clone)]
enum AgentAction {
    Upload(DocumentFile),
    Ask,
}

// The main window: upload, examples, question input and answers.
#[component]
pub fn AgentWindow() -> Element {
    let api = use_context::<HttpAgentApi>();
    let conversation = use_context::<Signal<Conversation>>();

    use_future({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { load_startup_data(&api, conversation).await }
        }
    });

    // Each action runs as its own task so an upload never queues behind a question.
    // Re-entry is rejected by the conversation's own flags.
    let agent = use_coroutine(move |mut rx: UnboundedReceiver<AgentAction>| {
        let api = api.clone();
        async move {
            while let Some(action) = rx.next().await {
                let api = api.clone();
                match action {
                    AgentAction::Upload(file) => {
                        spawn(upload_document(api, conversation, file));
                    }
                    AgentAction::Ask => {
                        spawn(ask_question(api, conversation));
                    }
                }
            }
        }
    });

    let state = conversation.read();
    let uploaded = state.upload.uploaded;
    let graph_info = state.graph_info.clone();

    rsx! {
        div {
            class: "cv-agent",
            Header {}
            UploadCard {
                on_file: move |file| agent.send(AgentAction::Upload(file)),
            }
            if let Some(info) = graph_info {
                AgentInfo { info }
            }
            GraphPanel {}
            if uploaded {
                ExampleQuestions {}
                div {
                    class: "chat-interface",
                    h3 { "💬 Conversation" }
                    QuestionInput {
                        on_ask: move |_| agent.send(AgentAction::Ask),
                    }
                    if let Some(latest) = state.transcript.latest() {
                        div {
                            class: "latest-response",
                            h3 { "🤖 Latest answer" }
                            ExchangeCard { entry: latest.clone(), show_details: false }
                        }
                    }
                    if state.transcript.len() > 1 {
                        div {
                            class: "chat-history",
                            h3 { "📝 History" }
                            for entry in state.transcript.history() {
                                ExchangeCard {
                                    key: "{entry.id}",
                                    entry: entry.clone(),
                                    show_details: true,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn load_startup_data(api: &HttpAgentApi, mut conversation: Signal<Conversation>) {
    match try_join(api.graph_info(), api.examples()).await {
        Ok((info, catalog)) => {
            tracing::info!(
                nodes = info.nodes.len(),
                categories = catalog.categories.len(),
                "Loaded agent metadata"
            );
            let mut state = conversation.write();
            state.load_graph_info(info);
            state.load_catalog(catalog);
        }
        Err(e) => tracing::error!("Failed to load agent metadata: {e}"),
    }

    match api.health().await {
        Ok(health) => conversation.write().set_health(health),
        Err(e) => tracing::warn!("Health check failed: {e}"),
    }
}

async fn upload_document(api: HttpAgentApi, mut conversation: Signal<Conversation>, file: DocumentFile) {
    let begun = conversation.write().begin_upload(Some(file));
    let file = match begun {
        Ok(Some(file)) => file,
        Ok(None) => return,
        Err(e) => {
            notify::show_error("Upload", &e.to_string()).await;
            return;
        }
    };

    let result = api.upload(&file).await;
    let finished = conversation.write().finish_upload(file.name, result);
    if let Err(e) = finished {
        notify::show_error("Upload", &e.to_string()).await;
    }
}

async fn ask_question(api: HttpAgentApi, mut conversation: Signal<Conversation>) {
    let Some(question) = conversation.write().begin_ask() else {
        return;
    };

    let (result, elapsed) = timed_ask(&api, &question).await;
    let outcome = conversation.write().finish_ask(question, result, elapsed).map(|_| ());
    if let Err(e) = outcome {
        notify::show_error("Question", &e.to_string()).await;
    }
}

#[component]
fn Header() -> Element {
    let config = use_context::<AppConfig>();
    let conversation = use_context::<Signal<Conversation>>();
    let health = conversation.read().health.clone();
    let health_class = match &health {
        Some(h) if h.is_healthy() => "ok",
        _ => "down",
    };

    rsx! {
        header {
            class: "agent-header",
            h1 { "🤖 {config.app_title}" }
            if config.is_dev() {
                small { class: "version", "v{config.app_version} - {config.mode} mode" }
            }
            if let Some(health) = health {
                div {
                    class: "health-badge {health_class}",
                    if health.is_healthy() { "🟢 Backend online" } else { "🔴 Backend {health.status}" }
                    if health.cv_loaded {
                        span { class: "health-detail", " · CV loaded ({health.cv_length} chars)" }
                    }
                }
            }
        }
    }
}

#[component]
fn AgentInfo(info: GraphInfo) -> Element {
    rsx! {
        div {
            class: "agent-info",
            h3 { "🧠 Agent architecture" }
            div {
                class: "info-grid",
                InfoCard { title: "📊 Graph nodes", count: info.nodes.len(), caption: "Processing stages" }
                InfoCard { title: "🔧 Tools", count: info.tools.len(), caption: "Specialised extractors" }
                InfoCard { title: "🔄 Workflows", count: info.workflow_types.len(), caption: "Flow types" }
            }
        }
    }
}

#[component]
fn InfoCard(title: &'static str, count: usize, caption: &'static str) -> Element {
    rsx! {
        div {
            class: "info-card",
            h4 { "{title}" }
            div { class: "info-count", "{count}" }
            small { "{caption}" }
        }
    }
}

#[component]
fn QuestionInput(on_ask: EventHandler<()>) -> Element {
    let mut conversation = use_context::<Signal<Conversation>>();
    let (asking, can_ask, draft) = {
        let state = conversation.read();
        (state.asking, state.can_ask(), state.draft.clone())
    };

    rsx! {
        div {
            class: "input-group",
            input {
                class: "question-input",
                r#type: "text",
                placeholder: "Ask something about the CV...",
                value: "{draft}",
                disabled: asking,
                oninput: move |event| conversation.write().set_draft(event.value()),
                onkeydown: move |event| {
                    if event.key() == Key::Enter {
                        event.prevent_default();
                        on_ask.call(());
                    }
                },
            }
            button {
                class: "ask-button",
                disabled: !can_ask,
                onclick: move |_| on_ask.call(()),
                if asking {
                    div { class: "spinner small" }
                    "Processing..."
                } else {
                    Icon { width: 16, height: 16, icon: fi_icons::FiSend }
                    " Ask"
                }
            }
        }
    }
}
