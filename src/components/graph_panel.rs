use cv_agent_core::graph::GraphPreview;
use cv_agent_core::HttpAgentApi;
use dioxus::prelude::*;
use dioxus_free_icons::{icons::fi_icons, Icon};

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[component]
pub fn GraphPanel() -> Element {
    let api = use_context::<HttpAgentApi>();
    let mut preview = use_signal(GraphPreview::default);

    let endpoints = api.endpoints().clone();
    let toggle = {
        let endpoints = endpoints.clone();
        move |_: MouseEvent| preview.write().toggle(&endpoints, now_millis())
    };
    let refresh = move |_: MouseEvent| preview.write().refresh(&endpoints, now_millis());

    let state = preview.read().clone();
    let image_url = state.image_url.clone().unwrap_or_default();

    rsx! {
        div {
            class: "graph-visualization",
            div {
                class: "graph-header",
                h3 { "📊 Agent workflow graph" }
                button {
                    class: "toggle-graph-btn",
                    onclick: toggle,
                    if state.visible {
                        Icon { width: 16, height: 16, icon: fi_icons::FiEyeOff }
                        " Hide graph"
                    } else {
                        Icon { width: 16, height: 16, icon: fi_icons::FiEye }
                        " Show graph"
                    }
                }
            }
            if state.visible {
                div {
                    class: "graph-container",
                    if let Some(error) = state.error {
                        div {
                            class: "graph-error",
                            p { "❌ {error}" }
                            button {
                                class: "retry-btn",
                                onclick: refresh.clone(),
                                Icon { width: 16, height: 16, icon: fi_icons::FiRefreshCw }
                                " Try again"
                            }
                        }
                    } else {
                        div {
                            class: "graph-image-container",
                            img {
                                src: "{image_url}",
                                alt: "Agent workflow diagram",
                                class: "graph-image",
                                onerror: move |_| {
                                    tracing::warn!("Graph image failed to load");
                                    preview.write().mark_load_failed();
                                },
                            }
                            div {
                                class: "graph-actions",
                                button {
                                    class: "refresh-btn",
                                    onclick: refresh.clone(),
                                    Icon { width: 16, height: 16, icon: fi_icons::FiRefreshCw }
                                    " Refresh"
                                }
                                a {
                                    class: "download-btn",
                                    href: "{image_url}",
                                    download: "cv-agent-workflow.png",
                                    Icon { width: 16, height: 16, icon: fi_icons::FiDownload }
                                    " Download"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
