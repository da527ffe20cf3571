#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use cv_agent_core::{AppConfig, Conversation, HttpAgentApi, RunMode};
use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;

mod components;
mod notify;

const STYLE: &str = include_str!("../assets/style.css");

fn main() {
    let build_mode = RunMode::parse(env!("CV_AGENT_BUILD_MODE")).unwrap_or(RunMode::Production);
    let config = match AppConfig::from_env(build_mode) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let level = if config.is_dev() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    dioxus_logger::init(level).expect("failed to init logger");
    tracing::info!(api = %config.api_base_url, mode = %config.mode, "Starting {}", env!("APP_NAME"));

    LaunchBuilder::new()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(config.app_title.clone())
                        .with_resizable(true)
                        .with_inner_size(LogicalSize::new(1100.0, 900.0)),
                )
                .with_custom_head(format!("<style>{STYLE}</style>")),
        )
        .with_context(config)
        .launch(app);
}

fn app() -> Element {
    let config = use_context::<AppConfig>();
    use_context_provider(|| HttpAgentApi::new(config.api_base_url.clone()));
    use_context_provider(|| Signal::new(Conversation::new()));

    rsx! {
        components::agent_window::AgentWindow {}
    }
}
