//! Core of the CV Agent front-end: everything that can be exercised without a window.

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod graph;
pub mod indicators;
pub mod markdown;
pub mod models;
pub mod transcript;
pub mod workflow;

pub use api::{AgentApi, Endpoints, HttpAgentApi};
pub use config::{AppConfig, RunMode};
pub use conversation::Conversation;
pub use error::{AgentError, ApiError, ConfigError};
