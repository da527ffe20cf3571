use std::fmt;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_APP_TITLE: &str = "CV Agent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(RunMode::Development),
            "production" | "prod" => Ok(RunMode::Production),
            _ => Err(ConfigError::InvalidMode(value.to_string())),
        }
    }

    pub fn is_dev(self) -> bool {
        self == RunMode::Development
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Development => write!(f, "development"),
            RunMode::Production => write!(f, "production"),
        }
    }
}

/// Front-end configuration resolved from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub app_title: String,
    pub app_version: String,
    pub mode: RunMode,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    /// `build_mode` is used when `CV_AGENT_MODE` is unset.
    pub fn from_env(build_mode: RunMode) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(build_mode, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(build_mode: RunMode, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = normalize_base_url(
            &non_empty("CV_AGENT_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;
        let mode = match non_empty("CV_AGENT_MODE") {
            Some(raw) => RunMode::parse(&raw)?,
            None => build_mode,
        };

        Ok(AppConfig {
            api_base_url,
            app_title: non_empty("CV_AGENT_APP_TITLE").unwrap_or_else(|| DEFAULT_APP_TITLE.to_string()),
            app_version: non_empty("CV_AGENT_APP_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            mode,
        })
    }

    pub fn is_dev(&self) -> bool {
        self.mode.is_dev()
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match reqwest::Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}
