//! Wire payloads exchanged with the inference backend and the entries built from them.

use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A résumé selected on disk, ready to be sent to `/upload`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    pub fn is_pdf(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".pdf")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadState {
    pub file_name: Option<String>,
    pub uploading: bool,
    pub uploaded: bool,
}

/// Body of a successful `/upload`. The backend treats it as informational only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadReceipt {
    pub status: Option<String>,
    pub filename: Option<String>,
    pub text_length: Option<u64>,
    pub pages: Option<u32>,
}

/// Body of a successful `/ask`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub question: Option<String>,
    pub answer: String,
    pub confidence: f64,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default)]
    pub workflow_path: Vec<String>,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub tools_used: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
}

fn default_attempts() -> u32 {
    1
}

/// One answered question. Only ever built from a successful [`AskResponse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEntry {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub confidence: f64,
    pub attempts: u32,
    pub workflow_path: Vec<String>,
    pub question_type: String,
    pub tools_used: Vec<String>,
    pub timestamp: String,
    pub processing_time: Duration,
}

impl ConversationEntry {
    pub fn from_response(question: String, response: AskResponse, processing_time: Duration) -> Self {
        let confidence = if response.confidence.is_finite() {
            response.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut tools_used: Vec<String> = Vec::with_capacity(response.tools_used.len());
        for tool in response.tools_used {
            if !tools_used.contains(&tool) {
                tools_used.push(tool);
            }
        }

        Self {
            id: Uuid::new_v4(),
            question,
            answer: response.answer,
            confidence,
            attempts: response.attempts.max(1),
            workflow_path: response.workflow_path,
            question_type: response.question_type,
            tools_used,
            timestamp: response.timestamp,
            processing_time,
        }
    }

    /// Backend timestamps are naive ISO-8601 strings; shown as `HH:MM:SS` when parseable.
    pub fn display_time(&self) -> String {
        match self.timestamp.parse::<NaiveDateTime>() {
            Ok(ts) => format!("{:02}:{:02}:{:02}", ts.hour(), ts.minute(), ts.second()),
            Err(_) => self.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphInfo {
    pub nodes: Vec<String>,
    pub tools: Vec<String>,
    pub workflow_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub cv_loaded: bool,
    pub cv_length: u64,
    pub agent_ready: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleCategory {
    pub name: String,
    pub questions: Vec<String>,
}

/// Example questions grouped by category, in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ExampleCatalog {
    pub categories: Vec<ExampleCategory>,
}

impl From<Map<String, Value>> for ExampleCatalog {
    fn from(map: Map<String, Value>) -> Self {
        let categories = map
            .into_iter()
            .map(|(name, value)| {
                let questions = match value {
                    Value::Array(items) => items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(q) => Some(q),
                            _ => None,
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                ExampleCategory { name, questions }
            })
            .collect();
        Self { categories }
    }
}

impl ExampleCatalog {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn questions(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.name == category)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}
