pub mod agent_window;
pub mod example_questions;
pub mod exchange_card;
pub mod formatted_response;
pub mod graph_panel;
pub mod indicators;
pub mod upload_card;
pub mod workflow_view;
